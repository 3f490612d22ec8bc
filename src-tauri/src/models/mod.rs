pub mod call;
pub mod contact;

pub use call::{
    CallLogEntry, CallStateEvent, CallType, PhoneState, RawCallDate, RawCallRecord, RawCallType,
};
pub use contact::{Contact, ContactQuery};
