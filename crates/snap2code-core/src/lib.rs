//! snap2code-core: everything between an uploaded screenshot and the model.
//!
//! - [`codec`] converts images to and from data URIs.
//! - [`prompt`] renders the fixed code-generation instruction for a technology.
//! - [`stack`] is the catalog of technologies the clients offer.
//! - [`gateway`] talks to the hosted multimodal model.

pub mod codec;
pub mod error;
pub mod gateway;
pub mod prompt;
pub mod stack;

pub use codec::DataUri;
pub use error::{CodecError, GenerationError};
pub use gateway::{
    CodeGenerator, GatewayConfig, GeminiGateway, GenerationRequest, GenerationResult, Retrying,
};
