//! Access tokens
//!
//! Signed, time-limited, single-use credentials that gate access to search. Issuance,
//! verification and consumption live in [`lifecycle`]; persistence sits behind
//! [`TokenStore`].

pub mod board;
pub mod codec;
pub mod errors;
pub mod gate;
pub mod lifecycle;
pub mod memory;
pub mod records;
pub mod store;
pub mod ttl;

pub use board::ActiveTokenBoard;
pub use codec::{AccessToken, SignedToken, TokenPayload, TokenSecret, issue, sign, verify};
pub use errors::{SigningError, StoreError, TokenError, TokenErrorKind, VerificationError};
pub use gate::{AccessGate, GateState};
pub use lifecycle::{IssuedToken, MockTokenService, TokenLifecycle, TokenService, unlock};
pub use memory::InMemoryTokenStore;
pub use records::{NewTokenRecord, TokenRecord, TokenRecordUuid, TokenStatus, TokenTransition};
pub use store::{MockTokenStore, TokenStore};
pub use ttl::{TokenTtl, UnsupportedTtl};
