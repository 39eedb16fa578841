pub mod artifact;
pub mod error;
pub mod model;
pub mod payload;
pub mod session;
pub mod turn;

pub use artifact::UploadedArtifact;
pub use error::{CoreError, Result};
pub use model::ModelSelection;
pub use payload::{ContextKind, ContextPayload};
pub use session::{ConversationSession, SessionId};
pub use turn::{ContentPart, ConversationTurn, MessageContent, Role};
