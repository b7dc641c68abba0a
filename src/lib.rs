// Client library for the Planyo booking-management REST API

pub mod client;
pub mod decoder;
pub mod endpoint;
pub mod lenient;
pub mod reservation;
pub mod signer;
pub mod timestamp;
pub mod transport;
pub mod wire;

// Re-export key types for convenience
pub use client::{ApiError, ClientConfig, ClientError, ErrorKind, PlanyoClient, ReservationApi};
pub use decoder::{decode_data, decode_envelope, Envelope};
pub use endpoint::{Endpoint, SiteIdentity};
pub use reservation::{RegularProduct, Reservation, ReservationList, ReservationProperties};
pub use signer::{Md5Signer, RequestSigner, Signature};
pub use transport::{HttpTransport, Transport};
