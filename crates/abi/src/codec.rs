//! The standard 32-byte-slot ABI codec (head/tail encoding).

use crate::error::{AbiError, AbiResult};
use crate::param_type::ParamType;
use crate::token::Token;
use num_bigint::BigUint;

/// The ABI slot width in bytes.
const WORD: usize = 32;

/// Encodes tokens after checking them against the expected parameter types.
///
/// # Errors
///
/// Returns `AbiError::TypeMismatch` on arity or type disagreement, or any
/// error [`encode`] can produce.
pub fn encode_params(types: &[ParamType], tokens: &[Token]) -> AbiResult<Vec<u8>> {
    if types.len() != tokens.len() {
        return Err(AbiError::TypeMismatch {
            expected: format!("{} parameters", types.len()),
            token: format!("{} arguments", tokens.len()),
        });
    }
    for (ty, token) in types.iter().zip(tokens) {
        if !token.type_check(ty) {
            return Err(AbiError::TypeMismatch {
                expected: ty.to_string(),
                token: token.to_string(),
            });
        }
    }
    encode(tokens)
}

/// Encodes a token sequence into ABI calldata form.
///
/// Static values occupy their head slot directly; dynamic values put an
/// offset in the head and their payload in the tail region.
///
/// # Errors
///
/// Returns `AbiError::ValueOutOfRange` if an integer exceeds 256 bits or a
/// fixed byte string exceeds 32 bytes.
pub fn encode(tokens: &[Token]) -> AbiResult<Vec<u8>> {
    let head_len = tokens.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        if token.is_dynamic() {
            head.extend_from_slice(&usize_word(head_len + tail.len()));
            encode_tail(token, &mut tail)?;
        } else {
            head.extend_from_slice(&static_word(token)?);
        }
    }

    head.extend_from_slice(&tail);
    Ok(head)
}

/// Decodes ABI calldata against the expected parameter types.
///
/// # Errors
///
/// Returns `AbiError::Truncated` if the payload ends early, or
/// `AbiError::InvalidEncoding` if a slot holds a value that is not valid for
/// its type (bad padding, out-of-range integer, non-UTF-8 string).
pub fn decode(types: &[ParamType], data: &[u8]) -> AbiResult<Vec<Token>> {
    let mut tokens = Vec::with_capacity(types.len());
    for (i, ty) in types.iter().enumerate() {
        tokens.push(decode_slot(ty, data, i * WORD)?);
    }
    Ok(tokens)
}

fn encode_tail(token: &Token, tail: &mut Vec<u8>) -> AbiResult<()> {
    match token {
        Token::Bytes(bytes) => {
            tail.extend_from_slice(&usize_word(bytes.len()));
            tail.extend_from_slice(bytes);
            pad_to_word(tail, bytes.len());
        }
        Token::String(s) => {
            tail.extend_from_slice(&usize_word(s.len()));
            tail.extend_from_slice(s.as_bytes());
            pad_to_word(tail, s.len());
        }
        Token::Array(items) => {
            tail.extend_from_slice(&usize_word(items.len()));
            // Element offsets are relative to the start of the element region.
            let encoded = encode(items)?;
            tail.extend_from_slice(&encoded);
        }
        _ => unreachable!("static token in tail position"),
    }
    Ok(())
}

fn static_word(token: &Token) -> AbiResult<[u8; WORD]> {
    let mut word = [0u8; WORD];
    match token {
        Token::Address(addr) => {
            word[12..].copy_from_slice(addr.as_bytes());
        }
        Token::Uint(value) => {
            let bytes = value.to_bytes_be();
            if bytes.len() > WORD {
                return Err(AbiError::ValueOutOfRange {
                    type_name: "uint256".to_string(),
                });
            }
            word[WORD - bytes.len()..].copy_from_slice(&bytes);
        }
        Token::Bool(value) => {
            word[WORD - 1] = u8::from(*value);
        }
        Token::FixedBytes(bytes) => {
            if bytes.len() > WORD {
                return Err(AbiError::ValueOutOfRange {
                    type_name: format!("bytes{}", bytes.len()),
                });
            }
            word[..bytes.len()].copy_from_slice(bytes);
        }
        _ => unreachable!("dynamic token in head position"),
    }
    Ok(word)
}

fn decode_slot(ty: &ParamType, data: &[u8], slot_offset: usize) -> AbiResult<Token> {
    let slot = word_at(data, slot_offset)?;
    if ty.is_dynamic() {
        let offset = word_to_usize(&slot)?;
        decode_tail(ty, data, offset)
    } else {
        decode_static(ty, &slot)
    }
}

fn decode_static(ty: &ParamType, word: &[u8; WORD]) -> AbiResult<Token> {
    match ty {
        ParamType::Address => {
            require_zero(&word[..12], "address padding")?;
            Ok(Token::Address(
                ethpipe_primitives::EthAddress::from_bytes(&word[12..])
                    .map_err(|e| AbiError::InvalidEncoding {
                        message: e.to_string(),
                    })?,
            ))
        }
        ParamType::Uint(bits) => {
            let value = BigUint::from_bytes_be(word);
            if value.bits() as usize > *bits {
                return Err(AbiError::InvalidEncoding {
                    message: format!("value does not fit uint{bits}"),
                });
            }
            Ok(Token::Uint(value))
        }
        ParamType::Bool => {
            require_zero(&word[..WORD - 1], "bool padding")?;
            match word[WORD - 1] {
                0 => Ok(Token::Bool(false)),
                1 => Ok(Token::Bool(true)),
                other => Err(AbiError::InvalidEncoding {
                    message: format!("invalid bool byte {other}"),
                }),
            }
        }
        ParamType::FixedBytes(len) => {
            require_zero(&word[*len..], "fixed bytes padding")?;
            Ok(Token::FixedBytes(word[..*len].to_vec()))
        }
        _ => unreachable!("dynamic type in static position"),
    }
}

fn decode_tail(ty: &ParamType, data: &[u8], offset: usize) -> AbiResult<Token> {
    match ty {
        ParamType::Bytes => Ok(Token::Bytes(decode_byte_payload(data, offset)?)),
        ParamType::String => {
            let bytes = decode_byte_payload(data, offset)?;
            String::from_utf8(bytes)
                .map(Token::String)
                .map_err(|e| AbiError::InvalidEncoding {
                    message: e.to_string(),
                })
        }
        ParamType::Array(inner) => {
            let len = word_to_usize(&word_at(data, offset)?)?;
            let region = data.get(offset + WORD..).ok_or(AbiError::Truncated {
                offset: offset + WORD,
                needed: WORD,
                available: data.len(),
            })?;
            // Each element owns at least one head slot.
            if len > region.len() / WORD {
                return Err(AbiError::Truncated {
                    offset: offset + WORD,
                    needed: len * WORD,
                    available: region.len(),
                });
            }
            let mut items = Vec::with_capacity(len);
            for i in 0..len {
                items.push(decode_slot(inner, region, i * WORD)?);
            }
            Ok(Token::Array(items))
        }
        _ => unreachable!("static type in tail position"),
    }
}

fn decode_byte_payload(data: &[u8], offset: usize) -> AbiResult<Vec<u8>> {
    let len = word_to_usize(&word_at(data, offset)?)?;
    let start = offset + WORD;
    data.get(start..start + len)
        .map(<[u8]>::to_vec)
        .ok_or(AbiError::Truncated {
            offset: start,
            needed: len,
            available: data.len().saturating_sub(start),
        })
}

fn word_at(data: &[u8], offset: usize) -> AbiResult<[u8; WORD]> {
    let slice = data.get(offset..offset + WORD).ok_or(AbiError::Truncated {
        offset,
        needed: WORD,
        available: data.len().saturating_sub(offset),
    })?;
    let mut word = [0u8; WORD];
    word.copy_from_slice(slice);
    Ok(word)
}

fn word_to_usize(word: &[u8; WORD]) -> AbiResult<usize> {
    require_zero(&word[..WORD - 8], "length/offset padding")?;
    let value = u64::from_be_bytes(word[WORD - 8..].try_into().unwrap_or_default());
    usize::try_from(value).map_err(|_| AbiError::InvalidEncoding {
        message: "length/offset exceeds usize".to_string(),
    })
}

fn require_zero(bytes: &[u8], what: &str) -> AbiResult<()> {
    if bytes.iter().all(|&b| b == 0) {
        Ok(())
    } else {
        Err(AbiError::InvalidEncoding {
            message: format!("nonzero {what}"),
        })
    }
}

fn usize_word(value: usize) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&(value as u64).to_be_bytes());
    word
}

fn pad_to_word(buf: &mut Vec<u8>, payload_len: usize) {
    let rem = payload_len % WORD;
    if rem != 0 {
        buf.resize(buf.len() + WORD - rem, 0);
    }
}
