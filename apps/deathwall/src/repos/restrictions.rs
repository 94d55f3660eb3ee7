//! Restriction instance repository functions.
//!
//! Effect metadata is stored as a JSON object and decoded on read; a row that
//! does not decode is reported as data corruption.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::restrictions_sea::{self as restrictions_adapter, RestrictionCreate};
use crate::domain::catalog::EffectMetadata;
use crate::entities::session_restrictions;
use crate::errors::domain::{DomainError, InfraErrorKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestrictionInstance {
    pub id: i64,
    pub session_id: i64,
    pub round_id: i64,
    pub restriction_id: String,
    pub metadata: EffectMetadata,
    pub created_at: OffsetDateTime,
}

/// A selected template with its placeholders already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestriction {
    pub restriction_id: String,
    pub metadata: EffectMetadata,
}

impl TryFrom<session_restrictions::Model> for RestrictionInstance {
    type Error = DomainError;

    fn try_from(model: session_restrictions::Model) -> Result<Self, Self::Error> {
        let metadata: EffectMetadata = serde_json::from_str(&model.metadata).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("restriction instance {} has unreadable metadata: {e}", model.id),
            )
        })?;
        Ok(Self {
            id: model.id,
            session_id: model.session_id,
            round_id: model.round_id,
            restriction_id: model.restriction_id,
            metadata,
            created_at: model.created_at,
        })
    }
}

fn decode_all(
    models: Vec<session_restrictions::Model>,
) -> Result<Vec<RestrictionInstance>, DomainError> {
    models.into_iter().map(RestrictionInstance::try_from).collect()
}

/// The session's full restriction history, in insertion order.
pub async fn find_all_by_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
) -> Result<Vec<RestrictionInstance>, DomainError> {
    decode_all(restrictions_adapter::find_all_by_session(conn, session_id).await?)
}

/// Template ids of every instance recorded for the session, for cap accounting.
pub async fn usage_history<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
) -> Result<Vec<String>, DomainError> {
    let models = restrictions_adapter::find_all_by_session(conn, session_id).await?;
    Ok(models.into_iter().map(|m| m.restriction_id).collect())
}

pub async fn create_batch(
    txn: &DatabaseTransaction,
    session_id: i64,
    round_id: i64,
    batch: Vec<NewRestriction>,
) -> Result<Vec<RestrictionInstance>, DomainError> {
    let mut dtos = Vec::with_capacity(batch.len());
    for item in batch {
        let metadata = serde_json::to_string(&item.metadata).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::Other("Serialize".into()),
                format!("failed to encode restriction metadata: {e}"),
            )
        })?;
        dtos.push(RestrictionCreate {
            session_id,
            round_id,
            restriction_id: item.restriction_id,
            metadata,
        });
    }
    decode_all(restrictions_adapter::create_many(txn, dtos).await?)
}
