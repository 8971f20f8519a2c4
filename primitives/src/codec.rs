//! Deterministic binary encoding for transactions.
//!
//! All numeric values are little-endian. Output values are encoded by their
//! IEEE-754 bit pattern so the encoding is exact.
//!
//! ```text
//! raw   = kind:u8
//!         n_in:u32  { source_hash:32 output_index:u32 flag:u8 [sig:64] }*
//!         n_out:u32 { value_bits:u64 owner:32 }*
//! full  = raw  flag:u8 [tx_sig:64]
//! payload(i) = source_hash_i:32 output_index_i:u32 n_out:u32 outputs...
//! ```
//!
//! The content hash of a transaction is SHA-256 over `full`. The authority
//! signs `raw`; each input owner signs `payload(i)`.

use crate::error::{CodecError, CodecResult};
use crate::transaction::{Input, Output, Transaction, TxKind};
use crate::types::{Hash, Signature, ZERO_HASH};

/// A cursor for reading bytes during decoding.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn read_bytes(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(CodecError::UnexpectedEnd {
                offset: self.pos,
                needed: n,
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u8(&mut self) -> CodecResult<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_u32(&mut self) -> CodecResult<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_u64(&mut self) -> CodecResult<u64> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.read_bytes(8)?);
        Ok(u64::from_le_bytes(buf))
    }

    fn read_hash(&mut self) -> CodecResult<Hash> {
        let mut hash = [0u8; 32];
        hash.copy_from_slice(self.read_bytes(32)?);
        Ok(hash)
    }

    fn read_optional_signature(&mut self) -> CodecResult<Option<Signature>> {
        match self.read_u8()? {
            0 => Ok(None),
            1 => {
                let mut sig = [0u8; 64];
                sig.copy_from_slice(self.read_bytes(64)?);
                Ok(Some(sig))
            }
            flag => Err(CodecError::InvalidFlag(flag)),
        }
    }
}

// ── Encoding helpers ──

fn write_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn write_u64(buf: &mut Vec<u8>, v: u64) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn write_optional_signature(buf: &mut Vec<u8>, sig: &Option<Signature>) {
    match sig {
        None => buf.push(0),
        Some(sig) => {
            buf.push(1);
            buf.extend_from_slice(sig);
        }
    }
}

fn write_outputs(buf: &mut Vec<u8>, outputs: &[Output]) {
    write_u32(buf, outputs.len() as u32);
    for output in outputs {
        write_u64(buf, output.value.to_bits());
        buf.extend_from_slice(&output.owner);
    }
}

// ── Transaction encoding ──

/// Encode everything except the transaction-level signature.
pub fn encode_raw(tx: &Transaction) -> Vec<u8> {
    let mut buf = Vec::with_capacity(9 + tx.inputs.len() * 101 + tx.outputs.len() * 40);
    buf.push(tx.kind as u8);
    write_u32(&mut buf, tx.inputs.len() as u32);
    for input in &tx.inputs {
        buf.extend_from_slice(&input.source_hash);
        write_u32(&mut buf, input.output_index);
        write_optional_signature(&mut buf, &input.signature);
    }
    write_outputs(&mut buf, &tx.outputs);
    buf
}

/// Encode the full transaction, including the transaction-level signature.
pub fn encode_transaction(tx: &Transaction) -> Vec<u8> {
    let mut buf = encode_raw(tx);
    write_optional_signature(&mut buf, &tx.signature);
    buf
}

/// Encode the payload signed by the owner of the output `input` claims.
pub fn encode_signing_payload(input: &Input, outputs: &[Output]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(40 + outputs.len() * 40);
    buf.extend_from_slice(&input.source_hash);
    write_u32(&mut buf, input.output_index);
    write_outputs(&mut buf, outputs);
    buf
}

/// Decode a full transaction and recompute its content hash.
///
/// The hash is never taken from the wire; it is always derived from the
/// decoded content.
pub fn decode_transaction(data: &[u8]) -> CodecResult<Transaction> {
    let mut r = Reader::new(data);

    let tag = r.read_u8()?;
    let kind = TxKind::from_u8(tag).ok_or(CodecError::UnknownKind(tag))?;

    let n_in = r.read_u32()? as usize;
    // Each input is at least 37 bytes; cap preallocation by what is left.
    let mut inputs = Vec::with_capacity(n_in.min(r.remaining() / 37));
    for _ in 0..n_in {
        let source_hash = r.read_hash()?;
        let output_index = r.read_u32()?;
        let signature = r.read_optional_signature()?;
        inputs.push(Input {
            source_hash,
            output_index,
            signature,
        });
    }

    let n_out = r.read_u32()? as usize;
    let mut outputs = Vec::with_capacity(n_out.min(r.remaining() / 40));
    for _ in 0..n_out {
        let value = f64::from_bits(r.read_u64()?);
        let owner = r.read_hash()?;
        outputs.push(Output { owner, value });
    }

    let signature = r.read_optional_signature()?;

    if r.remaining() != 0 {
        return Err(CodecError::TrailingBytes(r.remaining()));
    }

    let mut tx = Transaction {
        kind,
        inputs,
        outputs,
        signature,
        hash: ZERO_HASH,
    };
    tx.finalize();
    Ok(tx)
}
