// SPDX-License-Identifier: MPL-2.0

//! Binary encoding and decoding of collections and their values.
//!
//! Integers are written big-endian. Variable-length sequences carry a length prefix counting
//! items, not bytes. Decoding is driven by a [`Cursor`] so that several values can be read back
//! to back from one buffer; the `get_decoded*` helpers additionally insist that the whole buffer
//! is consumed.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Read};

/// Errors produced while encoding or decoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CodecError {
    /// An I/O error from the underlying buffer, usually a premature end of input.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// Extra data remained in the buffer after decoding a value.
    #[error("{0} bytes left in buffer after decoding value")]
    BytesLeftOver(usize),

    /// The length prefix of a sequence does not fit the chosen prefix width.
    #[error("length prefix of encoded sequence overflows prefix: {0}")]
    LengthPrefixTooBig(usize),

    /// The bytes decoded to a value that is not valid in this position.
    #[error("unexpected value")]
    UnexpectedValue,
}

/// Describes how to encode a value into bytes.
pub trait Encode {
    /// Append the encoded form of this object to the end of `bytes`, growing the vector as needed.
    fn encode(&self, bytes: &mut Vec<u8>) -> Result<(), CodecError>;

    /// Convenience method to encode a value into a new `Vec<u8>`.
    fn get_encoded(&self) -> Result<Vec<u8>, CodecError> {
        let mut bytes = Vec::with_capacity(self.encoded_len().unwrap_or(0));
        self.encode(&mut bytes)?;
        Ok(bytes)
    }

    /// Returns an optional hint indicating how many bytes will be required to encode this value,
    /// or `None` by default.
    fn encoded_len(&self) -> Option<usize> {
        None
    }
}

/// Describes how to decode a value from bytes, given a decoding parameter.
///
/// Ordered collections need their comparer to be rebuilt, so the comparer is the parameter.
pub trait ParameterizedDecode<P>: Sized {
    /// Read and decode an encoded object from `bytes`. On success, the decoded value is returned
    /// and `bytes` is advanced by the encoded size of the value.
    fn decode_with_param(
        decoding_parameter: &P,
        bytes: &mut Cursor<&[u8]>,
    ) -> Result<Self, CodecError>;

    /// Convenience method to decode a value from a byte slice. Fails with
    /// [`CodecError::BytesLeftOver`] if the slice is longer than the encoded value.
    fn get_decoded_with_param(decoding_parameter: &P, bytes: &[u8]) -> Result<Self, CodecError> {
        let mut cursor = Cursor::new(bytes);
        let decoded = Self::decode_with_param(decoding_parameter, &mut cursor)?;
        let remaining = remaining_len(&cursor);
        if remaining == 0 {
            Ok(decoded)
        } else {
            Err(CodecError::BytesLeftOver(remaining))
        }
    }
}

/// Describes how to decode a value from bytes without any parameter.
pub trait Decode: Sized {
    /// Read and decode an encoded object from `bytes`.
    fn decode(bytes: &mut Cursor<&[u8]>) -> Result<Self, CodecError>;

    /// Convenience method to decode a value from a byte slice. Fails with
    /// [`CodecError::BytesLeftOver`] if the slice is longer than the encoded value.
    fn get_decoded(bytes: &[u8]) -> Result<Self, CodecError> {
        Self::get_decoded_with_param(&(), bytes)
    }
}

impl<D: Decode, P> ParameterizedDecode<P> for D {
    fn decode_with_param(
        _decoding_parameter: &P,
        bytes: &mut Cursor<&[u8]>,
    ) -> Result<Self, CodecError> {
        Self::decode(bytes)
    }
}

fn remaining_len(cursor: &Cursor<&[u8]>) -> usize {
    let position = usize::try_from(cursor.position()).unwrap_or(usize::MAX);
    cursor.get_ref().len().saturating_sub(position)
}

impl Encode for () {
    fn encode(&self, _bytes: &mut Vec<u8>) -> Result<(), CodecError> {
        Ok(())
    }

    fn encoded_len(&self) -> Option<usize> {
        Some(0)
    }
}

impl Decode for () {
    fn decode(_bytes: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Ok(())
    }
}

impl Encode for u8 {
    fn encode(&self, bytes: &mut Vec<u8>) -> Result<(), CodecError> {
        bytes.push(*self);
        Ok(())
    }

    fn encoded_len(&self) -> Option<usize> {
        Some(1)
    }
}

impl Decode for u8 {
    fn decode(bytes: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Ok(bytes.read_u8()?)
    }
}

impl Encode for bool {
    fn encode(&self, bytes: &mut Vec<u8>) -> Result<(), CodecError> {
        u8::from(*self).encode(bytes)
    }

    fn encoded_len(&self) -> Option<usize> {
        Some(1)
    }
}

impl Decode for bool {
    fn decode(bytes: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        match u8::decode(bytes)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(CodecError::UnexpectedValue),
        }
    }
}

macro_rules! impl_codec_for_int {
    ($int:ty, $write:ident, $read:ident) => {
        impl Encode for $int {
            fn encode(&self, bytes: &mut Vec<u8>) -> Result<(), CodecError> {
                bytes.$write::<BigEndian>(*self)?;
                Ok(())
            }

            fn encoded_len(&self) -> Option<usize> {
                Some(core::mem::size_of::<$int>())
            }
        }

        impl Decode for $int {
            fn decode(bytes: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
                Ok(bytes.$read::<BigEndian>()?)
            }
        }
    };
}

impl_codec_for_int!(u16, write_u16, read_u16);
impl_codec_for_int!(u32, write_u32, read_u32);
impl_codec_for_int!(u64, write_u64, read_u64);
impl_codec_for_int!(i32, write_i32, read_i32);
impl_codec_for_int!(i64, write_i64, read_i64);

impl Encode for char {
    fn encode(&self, bytes: &mut Vec<u8>) -> Result<(), CodecError> {
        u32::from(*self).encode(bytes)
    }

    fn encoded_len(&self) -> Option<usize> {
        Some(4)
    }
}

impl Decode for char {
    fn decode(bytes: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        char::from_u32(u32::decode(bytes)?).ok_or(CodecError::UnexpectedValue)
    }
}

impl Encode for String {
    fn encode(&self, bytes: &mut Vec<u8>) -> Result<(), CodecError> {
        let len = u32::try_from(self.len()).map_err(|_| CodecError::LengthPrefixTooBig(self.len()))?;
        len.encode(bytes)?;
        bytes.extend_from_slice(self.as_bytes());
        Ok(())
    }

    fn encoded_len(&self) -> Option<usize> {
        Some(4 + self.len())
    }
}

impl Decode for String {
    fn decode(bytes: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        let len = usize::try_from(u32::decode(bytes)?).map_err(|_| CodecError::UnexpectedValue)?;
        if len > remaining_len(bytes) {
            return Err(CodecError::LengthPrefixTooBig(len));
        }
        let mut buf = vec![0; len];
        bytes.read_exact(&mut buf)?;
        String::from_utf8(buf).map_err(|_| CodecError::UnexpectedValue)
    }
}

/// Encode `items` into `bytes` as a sequence prefixed by its item count as a `u8`.
pub fn encode_u8_items<E: Encode>(bytes: &mut Vec<u8>, items: &[E]) -> Result<(), CodecError> {
    let len = u8::try_from(items.len()).map_err(|_| CodecError::LengthPrefixTooBig(items.len()))?;
    len.encode(bytes)?;
    for item in items {
        item.encode(bytes)?;
    }
    Ok(())
}

/// Decode a sequence written by [`encode_u8_items`].
pub fn decode_u8_items<D: Decode>(bytes: &mut Cursor<&[u8]>) -> Result<Vec<D>, CodecError> {
    let len = usize::from(u8::decode(bytes)?);
    (0..len).map(|_| D::decode(bytes)).collect()
}

/// Encode `items` into `bytes` as a sequence prefixed by its item count as a big-endian `u32`.
pub fn encode_u32_items<E: Encode>(bytes: &mut Vec<u8>, items: &[E]) -> Result<(), CodecError> {
    let len =
        u32::try_from(items.len()).map_err(|_| CodecError::LengthPrefixTooBig(items.len()))?;
    len.encode(bytes)?;
    for item in items {
        item.encode(bytes)?;
    }
    Ok(())
}

/// Decode a sequence written by [`encode_u32_items`].
pub fn decode_u32_items<D: Decode>(bytes: &mut Cursor<&[u8]>) -> Result<Vec<D>, CodecError> {
    let len = usize::try_from(u32::decode(bytes)?).map_err(|_| CodecError::UnexpectedValue)?;
    (0..len).map(|_| D::decode(bytes)).collect()
}
