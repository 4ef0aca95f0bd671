// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Wire shapes of item payloads and action configurations.
//!
//! Each shape is a protobuf message (so it can be packed into a `google.protobuf.Any` for the
//! flow service) which is also decodable from the JSON/YAML rule description.
//! Several item / action types share one shape (see [`crate::item::ItemType::shape`] and
//! [`crate::action::ActionType::shape`]).
//!
//! Numeric fields are wider than their protocol counterparts (`u32` for 8 and 16
//! bit header fields) so that out of range values reach the field validator, which rejects them
//! with a meaningful error.

use prost::Message;

use crate::decode::DecodeError;

/// Protobuf package of the flow service messages.
pub const PROTO_PACKAGE: &str = "flow";

const TYPE_URL_PREFIX: &str = "type.googleapis.com/";

/// Pack a message as a `google.protobuf.Any`.
pub(crate) fn pack<M: Message>(message_name: &str, msg: &M) -> prost_types::Any {
    prost_types::Any {
        type_url: format!("{TYPE_URL_PREFIX}{message_name}"),
        value: msg.encode_to_vec(),
    }
}

pub(crate) fn from_json<T: serde::de::DeserializeOwned>(
    raw: &serde_json::Value,
) -> Result<T, DecodeError> {
    T::deserialize(raw).map_err(|e| DecodeError::Json(e.to_string()))
}

/// Generates, for a list of `Variant(WireType) = "proto.Name"` entries:
/// * a fieldless shape enum (the registry entry),
/// * a payload enum holding decoded values (the tagged union carried through validation),
/// * decode / pack / validate dispatch between the two.
///
/// An entry may name a bespoke decoder with `via path::to::decoder` when the JSON form differs
/// from the wire form.
macro_rules! wire_shapes {
    (
        $(#[$shape_meta:meta])*
        shape $shape:ident;
        $(#[$payload_meta:meta])*
        payload $payload:ident;
        {
            $( $variant:ident($wire:ty) = $proto:literal $(via $decoder:path)? ),+ $(,)?
        }
    ) => {
        $(#[$shape_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $shape {
            $( $variant ),+
        }

        $(#[$payload_meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $payload {
            $( $variant($wire) ),+
        }

        impl $shape {
            /// Fully qualified protobuf message name of the shape.
            #[must_use]
            pub const fn message_name(self) -> &'static str {
                match self {
                    $( $shape::$variant => $proto ),+
                }
            }

            /// Whether field level validation is implemented for the shape.
            #[must_use]
            pub const fn is_strict(self) -> bool {
                match self {
                    $( $shape::$variant => <$wire as $crate::field::FieldCheck>::STRICT ),+
                }
            }

            /// Decode a raw JSON payload into the shape.
            ///
            /// # Errors
            ///
            /// Fails if the JSON does not fit the shape.
            pub fn decode(self, raw: &serde_json::Value) -> Result<$payload, DecodeError> {
                match self {
                    $( $shape::$variant => {
                        wire_shapes!(@decoder $wire $(, $decoder)?)(raw).map($payload::$variant)
                    } ),+
                }
            }
        }

        impl $payload {
            #[must_use]
            pub const fn shape(&self) -> $shape {
                match self {
                    $( $payload::$variant(_) => $shape::$variant ),+
                }
            }

            /// Pack the payload as a `google.protobuf.Any`.
            #[must_use]
            pub fn to_any(&self) -> prost_types::Any {
                match self {
                    $( $payload::$variant(msg) => $crate::wire::pack($proto, msg) ),+
                }
            }

            /// Validate `self` in the given role against `spec`.
            ///
            /// # Errors
            ///
            /// Returns the first field constraint that does not hold.
            pub fn validate(&self, spec: &$payload, role: Role) -> Result<(), FieldError> {
                match (self, spec) {
                    $( ($payload::$variant(candidate), $payload::$variant(spec)) => {
                        candidate.validate(spec, role)
                    } )+
                    #[allow(unreachable_patterns)]
                    _ => Err(FieldError::ShapeMismatch {
                        expected: spec.shape().message_name(),
                        found: self.shape().message_name(),
                    }),
                }
            }
        }
    };
    (@decoder $wire:ty) => {
        $crate::wire::from_json::<$wire>
    };
    (@decoder $wire:ty, $decoder:path) => {
        $decoder
    };
}

pub mod action;
pub mod item;

pub use action::{ActionConf, ActionShape};
pub use item::{ItemShape, ItemSpec};
