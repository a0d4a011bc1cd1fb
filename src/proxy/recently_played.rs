use std::sync::Arc;

use crate::channel::ChangeChannel;
use crate::collections::RecentlyPlayed;
use crate::guard::EchoGuard;
use crate::hub::HubError;
use crate::identity::{InstanceId, InstanceIdentity, OwnerId};
use crate::message::{ChangeMessage, MemberValue};

use super::error::ProxyError;
use super::model::ProxyModel;

/// Typed facade over a remoted [`RecentlyPlayed`] history.
pub struct RecentlyPlayedProxy {
    model: ProxyModel<RecentlyPlayed>,
}

impl RecentlyPlayedProxy {
    pub fn wrap(
        recent: RecentlyPlayed,
        owner: OwnerId,
        guard: Arc<EchoGuard>,
        channel: Arc<dyn ChangeChannel>,
    ) -> Self {
        Self {
            model: ProxyModel::wrap(recent, owner, guard, channel),
        }
    }

    pub fn reference(
        owner: OwnerId,
        instance: InstanceId,
        channel: Arc<dyn ChangeChannel>,
    ) -> Self {
        Self {
            model: ProxyModel::reference(owner, instance, channel),
        }
    }

    pub fn identity(&self) -> &InstanceIdentity {
        self.model.identity()
    }

    pub fn model(&self) -> &ProxyModel<RecentlyPlayed> {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut ProxyModel<RecentlyPlayed> {
        &mut self.model
    }

    pub fn entries(&self) -> Option<Vec<String>> {
        self.model.get_string_list("entries")
    }

    pub fn max_entries(&self) -> Option<u64> {
        self.model.get_u64("max_entries")
    }

    pub fn set_max_entries(&mut self, max: u64) -> Result<(), ProxyError> {
        self.model.set("max_entries", MemberValue::from(max))
    }

    pub fn record(&mut self, playable_id: &str) -> Result<Option<MemberValue>, ProxyError> {
        self.model.invoke("record", MemberValue::from(playable_id))
    }

    pub fn apply_inbound(&mut self, message: ChangeMessage) -> Result<(), HubError> {
        self.model.apply_inbound(message)
    }

    pub fn request_snapshot(&self) -> Result<(), ProxyError> {
        self.model.request_snapshot()
    }

    pub fn detach(&mut self) -> Result<(), HubError> {
        self.model.detach()
    }
}
