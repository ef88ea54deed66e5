pub mod envelope;

pub use envelope::{
    AuthPayload, Capability, DispatchAction, DispatchRequest, LogPayload, MailPayload,
    ServiceResponse,
};
