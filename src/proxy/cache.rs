use std::collections::{HashMap, VecDeque};

use crate::message::MemberValue;

/// Last-known member values on the subscriber side, plus received events.
/// Values start out unknown and resolve as inbound messages arrive.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct MemberCache {
    values: HashMap<String, MemberValue>,
    events: VecDeque<(String, MemberValue)>,
}

impl MemberCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, member: &str) -> Option<&MemberValue> {
        self.values.get(member)
    }

    pub fn store(&mut self, member: String, value: MemberValue) {
        self.values.insert(member, value);
    }

    pub fn push_event(&mut self, member: String, payload: MemberValue) {
        self.events.push_back((member, payload));
    }

    /// Drain received events in arrival order.
    pub fn take_events(&mut self) -> Vec<(String, MemberValue)> {
        self.events.drain(..).collect()
    }

    pub fn known_members(&self) -> usize {
        self.values.len()
    }
}
