//! Contract-creation payload construction.

use crate::compiler::CompiledContract;
use crate::error::{ChainError, Result};
use ethpipe_abi::{encode_params, AbiDefinition, Token};
use tracing::debug;

/// Builds the creation transaction payload: deployable bytecode followed by
/// the ABI-encoded constructor arguments.
///
/// Argument validation happens here, before anything touches the ledger or
/// the metadata store: a contract without a constructor accepts only an
/// empty argument list, and a declared constructor's parameter types must
/// accept the supplied tokens.
///
/// # Errors
///
/// - [`ChainError::Compilation`] when the artifact's bytecode is empty
/// - [`ChainError::ConstructorMismatch`] when arguments are supplied to a
///   constructor-less contract, or do not fit the declared parameter types
/// - [`ChainError::Abi`] when the artifact's ABI JSON does not parse
pub fn constructor_payload(contract: &CompiledContract, args: &[Token]) -> Result<Vec<u8>> {
    if contract.bytecode.is_empty() {
        return Err(ChainError::Compilation(
            "compiler produced empty bytecode".to_string(),
        ));
    }

    let abi = AbiDefinition::from_json(&contract.abi)?;
    let mut payload = contract.bytecode.clone();

    match abi.constructor() {
        None => {
            if !args.is_empty() {
                return Err(ChainError::ConstructorMismatch(format!(
                    "{} constructor arguments supplied but the contract declares no constructor",
                    args.len()
                )));
            }
        }
        Some(ctor) => {
            let types = ctor.param_types()?;
            let encoded = encode_params(&types, args)
                .map_err(|e| ChainError::ConstructorMismatch(e.to_string()))?;
            debug!(
                params = types.len(),
                encoded_len = encoded.len(),
                "encoded constructor arguments"
            );
            payload.extend_from_slice(&encoded);
        }
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethpipe_abi::AbiError;
    use ethpipe_primitives::EthAddress;

    const CTOR_ABI: &str = r#"[
        {"type": "constructor", "inputs": [
            {"name": "owner", "type": "address"},
            {"name": "supply", "type": "uint256"}
        ]}
    ]"#;

    fn contract(abi: &str, bytecode: Vec<u8>) -> CompiledContract {
        CompiledContract {
            abi: abi.to_string(),
            bytecode,
            metadata: None,
        }
    }

    #[test]
    fn test_no_constructor_no_args() {
        let c = contract("[]", vec![0x60, 0x80]);
        assert_eq!(constructor_payload(&c, &[]).unwrap(), vec![0x60, 0x80]);
    }

    #[test]
    fn test_args_appended_after_bytecode() {
        let c = contract(CTOR_ABI, vec![0xfe; 3]);
        let args = vec![
            Token::Address(EthAddress::from([0x11; 20])),
            Token::Uint(7u32.into()),
        ];
        let payload = constructor_payload(&c, &args).unwrap();

        assert_eq!(&payload[..3], &[0xfe; 3]);
        // Two static parameters encode to exactly two words.
        assert_eq!(payload.len(), 3 + 64);
        assert_eq!(payload[3 + 12..3 + 32], [0x11; 20]);
        assert_eq!(payload[payload.len() - 1], 7);
    }

    #[test]
    fn test_empty_bytecode_rejected() {
        let c = contract("[]", Vec::new());
        assert!(matches!(
            constructor_payload(&c, &[]),
            Err(ChainError::Compilation(_))
        ));
    }

    #[test]
    fn test_args_without_constructor_rejected() {
        let c = contract("[]", vec![0x00]);
        assert!(matches!(
            constructor_payload(&c, &[Token::Bool(true)]),
            Err(ChainError::ConstructorMismatch(_))
        ));
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let c = contract(CTOR_ABI, vec![0x00]);
        assert!(matches!(
            constructor_payload(&c, &[Token::Bool(true)]),
            Err(ChainError::ConstructorMismatch(_))
        ));
    }

    #[test]
    fn test_wrong_types_rejected() {
        let c = contract(CTOR_ABI, vec![0x00]);
        let args = vec![Token::Bool(true), Token::Uint(1u32.into())];
        assert!(matches!(
            constructor_payload(&c, &args),
            Err(ChainError::ConstructorMismatch(_))
        ));
    }

    #[test]
    fn test_bad_abi_json_surfaces() {
        let c = contract("not json", vec![0x00]);
        assert!(matches!(
            constructor_payload(&c, &[]),
            Err(ChainError::Abi(AbiError::InvalidJson { .. }))
        ));
    }
}
