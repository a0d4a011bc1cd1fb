use std::sync::Arc;

use crate::channel::ChangeChannel;
use crate::collections::Discoverables;
use crate::guard::EchoGuard;
use crate::hub::HubError;
use crate::identity::{InstanceId, InstanceIdentity, OwnerId};
use crate::message::{ChangeMessage, MemberValue};

use super::error::ProxyError;
use super::model::ProxyModel;

/// Typed facade over remoted [`Discoverables`].
pub struct DiscoverablesProxy {
    model: ProxyModel<Discoverables>,
}

impl DiscoverablesProxy {
    pub fn wrap(
        discoverables: Discoverables,
        owner: OwnerId,
        guard: Arc<EchoGuard>,
        channel: Arc<dyn ChangeChannel>,
    ) -> Self {
        Self {
            model: ProxyModel::wrap(discoverables, owner, guard, channel),
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

    pub fn model(&self) -> &ProxyModel<Discoverables> {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut ProxyModel<Discoverables> {
        &mut self.model
    }

    pub fn featured(&self) -> Option<Vec<String>> {
        self.model.get_string_list("featured")
    }

    pub fn refresh_minutes(&self) -> Option<u64> {
        self.model.get_u64("refresh_minutes")
    }

    pub fn set_refresh_minutes(&mut self, minutes: u64) -> Result<(), ProxyError> {
        self.model.set("refresh_minutes", MemberValue::from(minutes))
    }

    pub fn refresh(&mut self) -> Result<Option<MemberValue>, ProxyError> {
        self.model.invoke("refresh", MemberValue::Null)
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
