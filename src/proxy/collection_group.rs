use std::sync::Arc;

use crate::channel::ChangeChannel;
use crate::collections::CollectionGroup;
use crate::guard::EchoGuard;
use crate::hub::HubError;
use crate::identity::{InstanceId, InstanceIdentity, OwnerId};
use crate::message::{ChangeMessage, MemberValue};

use super::error::ProxyError;
use super::model::ProxyModel;

/// Typed facade over a remoted [`CollectionGroup`].
pub struct CollectionGroupProxy {
    model: ProxyModel<CollectionGroup>,
}

impl CollectionGroupProxy {
    pub fn wrap(
        group: CollectionGroup,
        owner: OwnerId,
        guard: Arc<EchoGuard>,
        channel: Arc<dyn ChangeChannel>,
    ) -> Self {
        Self {
            model: ProxyModel::wrap(group, owner, guard, channel),
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

    pub fn model(&self) -> &ProxyModel<CollectionGroup> {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut ProxyModel<CollectionGroup> {
        &mut self.model
    }

    pub fn name(&self) -> Option<String> {
        self.model.get_string("name")
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), ProxyError> {
        self.model.set("name", MemberValue::from(name))
    }

    pub fn total_item_count(&self) -> Option<u64> {
        self.model.get_u64("total_item_count")
    }

    pub fn set_total_item_count(&mut self, count: u64) -> Result<(), ProxyError> {
        self.model.set("total_item_count", MemberValue::from(count))
    }

    pub fn clear_items(&mut self) -> Result<Option<MemberValue>, ProxyError> {
        self.model.invoke("clear_items", MemberValue::Null)
    }

    pub fn apply_inbound(&mut self, message: ChangeMessage) -> Result<(), HubError> {
        self.model.apply_inbound(message)
    }

    pub fn request_snapshot(&self) -> Result<(), ProxyError> {
        self.model.request_snapshot()
    }

    pub fn take_events(&mut self) -> Vec<(String, MemberValue)> {
        self.model.take_events()
    }

    pub fn detach(&mut self) -> Result<(), HubError> {
        self.model.detach()
    }
}
