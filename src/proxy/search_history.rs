use std::sync::Arc;

use crate::channel::ChangeChannel;
use crate::collections::SearchHistory;
use crate::guard::EchoGuard;
use crate::hub::HubError;
use crate::identity::{InstanceId, InstanceIdentity, OwnerId};
use crate::message::{ChangeMessage, MemberValue};

use super::error::ProxyError;
use super::model::ProxyModel;

/// Typed facade over a remoted [`SearchHistory`].
pub struct SearchHistoryProxy {
    model: ProxyModel<SearchHistory>,
}

impl SearchHistoryProxy {
    pub fn wrap(
        history: SearchHistory,
        owner: OwnerId,
        guard: Arc<EchoGuard>,
        channel: Arc<dyn ChangeChannel>,
    ) -> Self {
        Self {
            model: ProxyModel::wrap(history, owner, guard, channel),
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

    pub fn model(&self) -> &ProxyModel<SearchHistory> {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut ProxyModel<SearchHistory> {
        &mut self.model
    }

    pub fn queries(&self) -> Option<Vec<String>> {
        self.model.get_string_list("queries")
    }

    pub fn push_query(&mut self, query: &str) -> Result<Option<MemberValue>, ProxyError> {
        self.model.invoke("push_query", MemberValue::from(query))
    }

    pub fn clear(&mut self) -> Result<Option<MemberValue>, ProxyError> {
        self.model.invoke("clear", MemberValue::Null)
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
