//! Device service: use-cases for inbound commands and events.

use std::marker::PhantomData;

use hubkit_domain::entity::Entity;
use hubkit_domain::error::{HubError, ValidationError};
use hubkit_domain::store::{DeviceType, Store};

/// Handles raw command and event payloads for one device type.
///
/// Callers must serialise access per entity; the service holds no locks.
pub struct DeviceService<D> {
    device: PhantomData<fn() -> D>,
}

impl<D> Default for DeviceService<D> {
    fn default() -> Self {
        Self {
            device: PhantomData,
        }
    }
}

impl<D: DeviceType> DeviceService<D> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a raw command payload to the entity's desired state.
    ///
    /// Fills the entity's default actions if it has none, then rejects the
    /// command unless the entity's own action list contains it.
    ///
    /// # Errors
    ///
    /// - [`HubError::Decode`] / [`HubError::Validation`] from parsing
    /// - [`ValidationError::UnsupportedAction`] if the entity does not enable the action
    /// - any error from [`Store::set_desired_from_command`]
    #[tracing::instrument(skip_all, fields(entity = %entity.id, domain = D::SCHEMA.domain))]
    pub fn handle_command(
        &self,
        entity: &mut Entity,
        payload: &[u8],
    ) -> Result<D::State, HubError> {
        let command = D::SCHEMA
            .parse_command(payload)
            .inspect_err(|err| tracing::warn!(error = ?err, "rejected command"))?;

        let mut store = Store::<D>::bind(entity);
        store.ensure_default_actions();
        if !store.supports(&command.action) {
            tracing::warn!(action = %command.action, "action not enabled on entity");
            return Err(ValidationError::UnsupportedAction {
                domain: D::SCHEMA.domain,
                action: command.action,
            }
            .into());
        }

        if let Err(err) = store.desired() {
            tracing::warn!(
                error = ?err,
                "stored desired state is malformed, starting from default"
            );
        }

        let state = store.set_desired_from_command(&command)?;
        tracing::debug!(action = %command.action, ?state, "desired state updated");
        Ok(state)
    }

    /// Apply a raw event payload to the entity's reported and effective state.
    ///
    /// Events are observations, so they are not gated by the entity's action
    /// list. `available_actions` is logged but never applied.
    ///
    /// # Errors
    ///
    /// - [`HubError::Decode`] / [`HubError::Validation`] from parsing
    /// - any error from [`Store::set_reported_from_event`]
    #[tracing::instrument(skip_all, fields(entity = %entity.id, domain = D::SCHEMA.domain))]
    pub fn handle_event(
        &self,
        entity: &mut Entity,
        payload: &[u8],
    ) -> Result<D::State, HubError> {
        let event = D::SCHEMA
            .parse_event(payload)
            .inspect_err(|err| tracing::warn!(error = ?err, "rejected event"))?;

        let mut store = Store::<D>::bind(entity);
        store.ensure_default_actions();
        if let Some(available) = &event.available_actions
            && *available != store.entity().actions
        {
            tracing::debug!(
                ?available,
                "device reports different actions, keeping configured list"
            );
        }
        if let Err(err) = store.reported() {
            tracing::warn!(
                error = ?err,
                "stored reported state is malformed, starting from default"
            );
        }

        let state = store.set_reported_from_event(&event)?;
        tracing::debug!(
            action = %event.action,
            cause = event.cause.as_deref(),
            ?state,
            "reported state updated"
        );
        Ok(state)
    }
}
