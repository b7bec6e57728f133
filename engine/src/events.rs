//! Controller events
//!
//! Every notable moment of a step is appended to an [`EventQueue`] in the
//! order it happened. The host drains the queue once the step returns and
//! forwards the records to audio, UI and camera code.

use crate::player::footsteps::FootstepCue;
use crate::player::pose::PoseState;
use crate::probe::LandingRecord;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerEvent {
    /// Ground contact was lost (walked off, jumped, or slid onto a steep slope)
    LeftGround,
    /// Ground contact regained after a flight long enough to report
    Landed(LandingRecord),
    JumpStart,
    /// Jump power ran out or was cut by a ceiling
    JumpEnd,
    /// A pose transition was requested. `to` may be a roof redirect.
    TransitionStart { from: PoseState, to: PoseState },
    /// The blend toward `state` finished
    TransitionEnd { state: PoseState },
    Footstep(FootstepCue),
}

/// Ordered outbound events of one or more steps.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<ControllerEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: ControllerEvent) {
        self.events.push(event);
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> std::vec::Drain<'_, ControllerEvent> {
        self.events.drain(..)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ControllerEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// How many pending events match `pred`.
    pub fn count(&self, pred: impl Fn(&ControllerEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_keeps_order_and_empties() {
        let mut queue = EventQueue::new();
        queue.push(ControllerEvent::JumpStart);
        queue.push(ControllerEvent::LeftGround);
        queue.push(ControllerEvent::JumpEnd);

        assert_eq!(queue.count(|e| matches!(e, ControllerEvent::JumpStart)), 1);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(
            drained,
            vec![
                ControllerEvent::JumpStart,
                ControllerEvent::LeftGround,
                ControllerEvent::JumpEnd
            ]
        );
        assert!(queue.is_empty());
    }
}
