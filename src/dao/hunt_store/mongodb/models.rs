use mongodb::bson::{Binary, Document, doc, spec::BinarySubtype};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dao::models::GameStatusEntity;

/// Discriminator value keying the singleton settings record.
pub const GAME_STATUS_TYPE: &str = "game_status";

/// Wire representation of the settings record, carrying the discriminator
/// alongside the shared [`GameStatusEntity`] fields.
#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsDocument {
    /// Discriminator, always [`GAME_STATUS_TYPE`].
    #[serde(rename = "type")]
    pub doc_type: String,
    /// The mirrored game-status fields.
    #[serde(flatten)]
    pub status: GameStatusEntity,
}

impl From<GameStatusEntity> for SettingsDocument {
    fn from(status: GameStatusEntity) -> Self {
        Self {
            doc_type: GAME_STATUS_TYPE.to_owned(),
            status,
        }
    }
}

/// Filter selecting the singleton settings record.
pub fn settings_filter() -> Document {
    doc! { "type": GAME_STATUS_TYPE }
}

fn uuid_as_binary(id: Uuid) -> Binary {
    Binary {
        subtype: BinarySubtype::Uuid,
        bytes: id.into_bytes().to_vec(),
    }
}

/// Filter selecting a team document by primary key.
pub fn team_filter(id: Uuid) -> Document {
    doc! { "_id": uuid_as_binary(id) }
}
