//! # Service-Bus Envelope Constants
//!
//! The binary envelope format used for internal service-bus messages. The
//! HTTP resolver is a peer of this envelope's users - both address the same
//! service/method metadata - but nothing in this crate reads or writes the
//! byte layout; the constants are published here so transport and dispatch
//! collaborators agree on one definition.
//!
//! An envelope opens with a marker byte and a version byte, followed by
//! fields in a fixed order separated by [`PROTOCOL_SEPARATOR`]:
//! message id, destination address, return address, object name, method name.

/// First byte of every envelope.
pub const PROTOCOL_MARKER: u8 = 0x1c;

/// Byte separating envelope fields.
pub const PROTOCOL_SEPARATOR: u8 = 0x1d;

/// Version byte for the first protocol revision.
pub const PROTOCOL_VERSION_1: u8 = b'a';

/// Offset of the marker byte within the envelope.
pub const PROTOCOL_MARKER_POSITION: usize = 0;
/// Offset of the version byte within the envelope.
pub const VERSION_MARKER_POSITION: usize = 1;

/// Field order within the envelope body.
pub const MESSAGE_ID_POS: usize = 0;
pub const ADDRESS_POS: usize = 1;
pub const RETURN_ADDRESS_POS: usize = 2;
pub const OBJECT_NAME_POS: usize = 3;
pub const METHOD_NAME_POS: usize = 4;

/// Field keys used by map-shaped envelope payloads.
pub const METHOD_NAME_KEY: &str = "methodName";
pub const OBJECT_NAME_KEY: &str = "objectName";
pub const ADDRESS_KEY: &str = "addressOfService";
pub const RETURN_ADDRESS_KEY: &str = "addressOfReturn";
