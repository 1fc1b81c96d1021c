// This file holds the transaction model exactly as the mempool records describe it
// Every input carries a snapshot of the output it spends, so nothing is looked up elsewhere
// Field names follow the model; serde renames map them onto the record keys

use crate::error::{AssemblyError, Result};
use crate::utils::{encode_varint, script_bytes, txid_bytes, write_var_bytes};
use serde::{Deserialize, Deserializer, Serialize};

/// Sequence number carried by the coinbase input
pub const SEQUENCE_FINAL: u32 = 0xffff_ffff;

/// Previous index reserved for "no real previous output"
pub const COINBASE_PREVIOUS_INDEX: i64 = -1;

// Records write `null` or leave the key out when there is nothing to say
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// A previous index has to fit the 4-byte wire field, or be the -1 coinbase marker
fn previous_index<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let index = i64::deserialize(deserializer)?;
    if index == COINBASE_PREVIOUS_INDEX || u32::try_from(index).is_ok() {
        Ok(index)
    } else {
        Err(serde::de::Error::custom(format!(
            "vout {index} is outside -1..={}",
            u32::MAX
        )))
    }
}

// The wire form of a previous index: -1 is the 0xffffffff "no previous output" marker.
// Decoding already keeps indices in range, so saturation only affects values built by hand
fn wire_index(index: i64) -> u32 {
    if index == COINBASE_PREVIOUS_INDEX {
        return SEQUENCE_FINAL;
    }
    u32::try_from(index).unwrap_or(u32::MAX)
}

// This is an output - either one created by the transaction, or (as a Prevout)
// the snapshot of the output an input is spending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    #[serde(rename = "scriptpubkey", default, deserialize_with = "null_as_default")]
    pub locking_script: String, // hex-encoded script
    #[serde(rename = "scriptpubkey_asm", default, deserialize_with = "null_as_default")]
    pub locking_script_disassembly: String,
    #[serde(rename = "scriptpubkey_type", default, deserialize_with = "null_as_default")]
    pub locking_script_type: String, // e.g. "p2pkh"
    #[serde(rename = "scriptpubkey_address", default, deserialize_with = "null_as_default")]
    pub address: String, // may be empty for outputs without an address
    pub value: u64, // in the smallest currency unit
}

/// The snapshot of a spent output has the same shape as any other output
pub type Prevout = TxOutput;

impl TxOutput {
    pub fn new(locking_script: &str, value: u64) -> TxOutput {
        TxOutput {
            locking_script: locking_script.to_string(),
            value,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    #[serde(rename = "txid")]
    pub previous_txid: String, // hex txid of the transaction being spent
    #[serde(rename = "vout", deserialize_with = "previous_index")]
    pub previous_index: i64, // -1 means there is no real previous output
    #[serde(rename = "scriptsig", default, deserialize_with = "null_as_default")]
    pub unlocking_script: String,
    #[serde(rename = "witness", default, deserialize_with = "null_as_default")]
    pub witness_items: Vec<String>,
    #[serde(default)]
    pub is_coinbase: bool, // advisory only, see Transaction::is_coinbase
    pub sequence: u32,
    #[serde(rename = "prevout")]
    pub prev_out: Prevout,
}

impl TxInput {
    pub fn new(previous_txid: &str, previous_index: i64, prev_out: Prevout) -> TxInput {
        TxInput {
            previous_txid: previous_txid.to_string(),
            previous_index,
            sequence: SEQUENCE_FINAL,
            prev_out,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: u32,
    pub locktime: u32,
    #[serde(rename = "vin")]
    pub inputs: Vec<TxInput>,
    #[serde(rename = "vout")]
    pub outputs: Vec<TxOutput>,
}

impl Transaction {
    // The coinbase pays out the block reward and spends nothing.
    // It never goes through the validator - it would fail the fee rule by construction
    pub fn new_coinbase_tx(reward: u64) -> Transaction {
        let coinbase_input = TxInput {
            previous_txid: String::new(),
            previous_index: COINBASE_PREVIOUS_INDEX,
            unlocking_script: String::new(),
            witness_items: vec![],
            is_coinbase: true,
            sequence: SEQUENCE_FINAL,
            prev_out: Prevout::default(), // zero value: the input side carries no spend
        };

        Transaction {
            version: 1,
            locktime: 0,
            inputs: vec![coinbase_input],
            outputs: vec![TxOutput::new("", reward)],
        }
    }

    /// Structural coinbase test. The `is_coinbase` flag on inputs is not trusted.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_index == COINBASE_PREVIOUS_INDEX
    }

    /// Sum of the prevout values of every input
    pub fn input_value(&self) -> Result<u64> {
        let mut total = 0u64;
        for input in &self.inputs {
            total = total.checked_add(input.prev_out.value).ok_or_else(|| {
                AssemblyError::Transaction("Input value overflow".to_string())
            })?;
        }
        Ok(total)
    }

    /// Sum of the values of every output
    pub fn output_value(&self) -> Result<u64> {
        let mut total = 0u64;
        for output in &self.outputs {
            total = total.checked_add(output.value).ok_or_else(|| {
                AssemblyError::Transaction("Output value overflow".to_string())
            })?;
        }
        Ok(total)
    }

    /// The txid referenced by the first input, if there is one
    pub fn first_input_txid(&self) -> Option<&str> {
        self.inputs.first().map(|input| input.previous_txid.as_str())
    }

    /// Legacy (non-witness) wire encoding of this transaction.
    ///
    /// Scripts and txids are opaque text in the records. Hex text is decoded,
    /// anything else goes in as its raw bytes, so every decodable record has a size.
    pub fn serialize(&self) -> Vec<u8> {
        let mut data = Vec::new();

        data.extend_from_slice(&self.version.to_le_bytes());

        data.extend_from_slice(&encode_varint(self.inputs.len() as u64));
        for input in &self.inputs {
            data.extend_from_slice(&txid_bytes(&input.previous_txid));
            data.extend_from_slice(&wire_index(input.previous_index).to_le_bytes());
            write_var_bytes(&mut data, &script_bytes(&input.unlocking_script));
            data.extend_from_slice(&input.sequence.to_le_bytes());
        }

        data.extend_from_slice(&encode_varint(self.outputs.len() as u64));
        for output in &self.outputs {
            data.extend_from_slice(&output.value.to_le_bytes());
            write_var_bytes(&mut data, &script_bytes(&output.locking_script));
        }

        data.extend_from_slice(&self.locktime.to_le_bytes());
        data
    }

    pub fn serialized_size(&self) -> u64 {
        self.serialize().len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TXID: &str = "fc9e4f9c334d55c1dc535bd691a1c159b0f7314c54745522257a905e18a56779";

    fn spend(value_in: u64, value_out: u64) -> Transaction {
        Transaction {
            version: 2,
            locktime: 0,
            inputs: vec![TxInput::new(TXID, 0, TxOutput::new("0014aa", value_in))],
            outputs: vec![TxOutput::new("0014bb", value_out)],
        }
    }

    #[test]
    fn test_coinbase_shape() {
        let coinbase = Transaction::new_coinbase_tx(625_000_000);

        assert_eq!(coinbase.version, 1);
        assert_eq!(coinbase.locktime, 0);
        assert_eq!(coinbase.inputs.len(), 1);
        assert_eq!(coinbase.outputs.len(), 1);

        let input = &coinbase.inputs[0];
        assert_eq!(input.previous_index, -1);
        assert!(input.is_coinbase);
        assert_eq!(input.sequence, 0xFFFFFFFF);
        assert_eq!(input.prev_out.value, 0);
        assert!(input.witness_items.is_empty());

        assert_eq!(coinbase.outputs[0].value, 625_000_000);
        assert!(coinbase.is_coinbase());
    }

    #[test]
    fn test_is_coinbase_ignores_advisory_flag() {
        let mut tx = spend(10, 5);
        tx.inputs[0].is_coinbase = true;
        assert!(!tx.is_coinbase());
    }

    #[test]
    fn test_value_sums() {
        let mut tx = spend(5_000, 4_000);
        tx.inputs.push(TxInput::new(TXID, 1, TxOutput::new("", 1_500)));
        assert_eq!(tx.input_value().unwrap(), 6_500);
        assert_eq!(tx.output_value().unwrap(), 4_000);
    }

    #[test]
    fn test_value_sum_overflow_is_an_error() {
        let mut tx = spend(u64::MAX, 1);
        tx.inputs.push(TxInput::new(TXID, 1, TxOutput::new("", 1)));
        assert!(tx.input_value().is_err());
    }

    #[test]
    fn test_serialize_layout() {
        let tx = spend(5_000, 4_000);
        let bytes = tx.serialize();

        // version, count, (txid, index, empty script, sequence), count, (value, 3-byte script), locktime
        assert_eq!(bytes.len(), 4 + 1 + (32 + 4 + 1 + 4) + 1 + (8 + 1 + 3) + 4);
        assert_eq!(&bytes[..4], &2u32.to_le_bytes());
        assert_eq!(bytes[4], 1);
        // txid is written in internal (reversed) byte order
        assert_eq!(bytes[5], 0x79);
        assert_eq!(bytes[36], 0xfc);
        assert_eq!(tx.serialized_size(), bytes.len() as u64);
    }

    #[test]
    fn test_coinbase_serializes_with_null_prevout_marker() {
        let bytes = Transaction::new_coinbase_tx(0).serialize();
        assert_eq!(&bytes[5..37], &[0u8; 32]);
        assert_eq!(&bytes[37..41], &[0xff; 4]);
        assert_eq!(bytes.len(), 4 + 1 + 32 + 4 + 1 + 4 + 1 + 8 + 1 + 4);
    }

    #[test]
    fn test_serialize_carries_non_hex_script_as_text() {
        let mut tx = spend(10, 5);
        tx.outputs[0].locking_script = "OP_RETURN".to_string();
        let bytes = tx.serialize();

        // value, then a 9-byte script, then locktime
        let script_start = bytes.len() - 4 - 9;
        assert_eq!(bytes[script_start - 1], 9);
        assert_eq!(&bytes[script_start..bytes.len() - 4], b"OP_RETURN");
        assert_eq!(tx.serialized_size(), spend(10, 5).serialized_size() - 3 + 9);
    }

    #[test]
    fn test_serialize_carries_short_txid_as_text() {
        let mut tx = spend(10, 5);
        tx.inputs[0].previous_txid = "tx1".to_string();
        let bytes = tx.serialize();

        assert_eq!(&bytes[5..8], b"tx1");
        assert_eq!(&bytes[8..12], &0u32.to_le_bytes());
        assert_eq!(tx.serialized_size(), spend(10, 5).serialized_size() - 32 + 3);
    }

    #[test]
    fn test_wire_index() {
        assert_eq!(wire_index(-1), 0xffff_ffff);
        assert_eq!(wire_index(0), 0);
        assert_eq!(wire_index(7), 7);
        assert_eq!(wire_index(u32::MAX as i64), u32::MAX);
    }

    #[test]
    fn test_decode_rejects_out_of_range_vout() {
        let record = |vout: i64| {
            format!(
                r#"{{"version":1,"locktime":0,"vin":[{{"txid":"","vout":{vout},"sequence":0,
                    "prevout":{{"scriptpubkey":"","value":1}}}}],"vout":[]}}"#
            )
        };
        assert!(serde_json::from_str::<Transaction>(&record(-1)).is_ok());
        assert!(serde_json::from_str::<Transaction>(&record(4_294_967_295)).is_ok());
        assert!(serde_json::from_str::<Transaction>(&record(-2)).is_err());
        assert!(serde_json::from_str::<Transaction>(&record(4_294_967_296)).is_err());
    }

    #[test]
    fn test_decode_record_json() {
        let json = r#"{
            "version": 1,
            "locktime": 0,
            "vin": [{
                "txid": "fc9e4f9c334d55c1dc535bd691a1c159b0f7314c54745522257a905e18a56779",
                "vout": 3,
                "prevout": {
                    "scriptpubkey": "76a914",
                    "scriptpubkey_asm": "OP_DUP OP_HASH160",
                    "scriptpubkey_type": "p2pkh",
                    "scriptpubkey_address": "1KGv",
                    "value": 5000
                },
                "scriptsig": "",
                "scriptsig_asm": "",
                "is_coinbase": false,
                "sequence": 4294967293
            }],
            "vout": [{
                "scriptpubkey": "6a",
                "scriptpubkey_asm": "OP_RETURN",
                "scriptpubkey_type": "op_return",
                "value": 4000
            }]
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.inputs[0].previous_txid, TXID);
        assert_eq!(tx.inputs[0].previous_index, 3);
        assert!(tx.inputs[0].witness_items.is_empty());
        assert_eq!(tx.inputs[0].prev_out.locking_script_type, "p2pkh");
        assert_eq!(tx.inputs[0].prev_out.value, 5000);
        assert_eq!(tx.outputs[0].address, "");
        assert_eq!(tx.outputs[0].value, 4000);
    }

    #[test]
    fn test_decode_rejects_negative_value() {
        let json = r#"{"version":1,"locktime":0,"vin":[],"vout":[{"scriptpubkey":"","value":-5}]}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn test_coinbase_json_uses_record_keys() {
        let json = serde_json::to_string(&Transaction::new_coinbase_tx(0)).unwrap();
        assert!(json.starts_with(r#"{"version":1,"locktime":0,"vin":[{"txid":"","vout":-1,"#));
        assert!(json.contains(r#""is_coinbase":true"#));
        assert!(json.contains(r#""sequence":4294967295"#));
        assert!(json.contains(r#""scriptpubkey_address":"""#));
        assert!(!json.contains('\n'));
    }
}
