use crate::simulation_engine::movement::Action;

/// Maps a vehicle observation to the action it should take this tick.
pub trait Policy {
    fn choose_action(&mut self, observation: &[f64]) -> Action;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn choose_action(&mut self, observation: &[f64]) -> Action {
        (**self).choose_action(observation)
    }
}

/// Wraps any closure as a policy (human input, test scripts).
pub struct FnPolicy<F>(pub F);

impl<F> Policy for FnPolicy<F>
where
    F: FnMut(&[f64]) -> Action,
{
    fn choose_action(&mut self, observation: &[f64]) -> Action {
        (self.0)(observation)
    }
}

/// Replays a fixed list of actions, cycling when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedPolicy {
    actions: Vec<Action>,
    cursor: usize,
}

impl ScriptedPolicy {
    /// An empty script always speeds up.
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions, cursor: 0 }
    }

    pub fn constant(action: Action) -> Self {
        Self::new(vec![action])
    }
}

impl Policy for ScriptedPolicy {
    fn choose_action(&mut self, _observation: &[f64]) -> Action {
        if self.actions.is_empty() {
            return Action::SpeedUp;
        }
        let action = self.actions[self.cursor % self.actions.len()];
        self.cursor = (self.cursor + 1) % self.actions.len();
        action
    }
}

/// Rule-based driver that steers toward whichever side has more room.
///
/// Assumes sensors are ordered from the right side (negative offsets) to the left.
#[derive(Debug, Clone, Copy)]
pub struct GapSeeker {
    /// Minimum difference between sides before turning.
    pub margin: f64,
}

impl Default for GapSeeker {
    fn default() -> Self {
        Self { margin: 0.5 }
    }
}

impl Policy for GapSeeker {
    fn choose_action(&mut self, observation: &[f64]) -> Action {
        let half = observation.len() / 2;
        let right: f64 = observation[..half].iter().sum();
        let left: f64 = observation[observation.len() - half..].iter().sum();
        if left > right + self.margin {
            Action::TurnLeft
        } else if right > left + self.margin {
            Action::TurnRight
        } else {
            Action::SpeedUp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_policy_cycles() {
        let mut policy = ScriptedPolicy::new(vec![Action::TurnLeft, Action::SlowDown]);
        let picked: Vec<_> = (0..5).map(|_| policy.choose_action(&[])).collect();
        assert_eq!(
            picked,
            vec![
                Action::TurnLeft,
                Action::SlowDown,
                Action::TurnLeft,
                Action::SlowDown,
                Action::TurnLeft
            ]
        );
    }

    #[test]
    fn gap_seeker_turns_toward_open_side() {
        let mut policy = GapSeeker::default();
        assert_eq!(
            policy.choose_action(&[1.0, 1.0, 5.0, 9.0, 9.0]),
            Action::TurnLeft
        );
        assert_eq!(
            policy.choose_action(&[9.0, 9.0, 5.0, 1.0, 1.0]),
            Action::TurnRight
        );
        assert_eq!(
            policy.choose_action(&[4.0, 4.0, 5.0, 4.0, 4.0]),
            Action::SpeedUp
        );
    }

    #[test]
    fn closures_and_boxes_are_policies() {
        let mut boxed: Box<dyn Policy> = Box::new(FnPolicy(|obs: &[f64]| {
            if obs.is_empty() {
                Action::SlowDown
            } else {
                Action::TurnRight
            }
        }));
        assert_eq!(boxed.choose_action(&[]), Action::SlowDown);
        assert_eq!(boxed.choose_action(&[1.0]), Action::TurnRight);
    }
}
