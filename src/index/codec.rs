use crate::core::error::{Error, ErrorKind, Result};
use crate::index::types::{DocId, Entry, Index, Value, ValueRefs, ValueType};

const NUL: u8 = 0;

/// Serializes an `Index` to its on-disk byte stream: a bare concatenation
/// of entries, no header, no footer. Integers are 32-bit big-endian,
/// floats 64-bit big-endian IEEE-754, strings NUL-terminated UTF-8.
pub fn serialize(index: &Index) -> Vec<u8> {
    let mut out = Vec::new();
    for entry in &index.entries {
        out.extend_from_slice(entry.path.as_bytes());
        out.push(NUL);
        out.push(entry.value_type.byte());

        match entry.value_type {
            ValueType::Float => {
                out.extend_from_slice(&(entry.value_refs.len() as u32).to_be_bytes());
                for refs in &entry.value_refs {
                    let Value::Float(v) = refs.value else { unreachable!("Float entry holds non-Float value") };
                    out.extend_from_slice(&v.to_be_bytes());
                    write_doc_ids(&mut out, &refs.doc_ids);
                }
            }
            ValueType::Str => {
                out.extend_from_slice(&(entry.value_refs.len() as u32).to_be_bytes());
                for refs in &entry.value_refs {
                    let Value::Str(ref s) = refs.value else { unreachable!("Str entry holds non-Str value") };
                    out.extend_from_slice(s.as_bytes());
                    out.push(NUL);
                    write_doc_ids(&mut out, &refs.doc_ids);
                }
            }
            ValueType::Null => {
                // Exactly one implicit value-refs; no value bytes at all.
                let refs = &entry.value_refs[0];
                write_doc_ids(&mut out, &refs.doc_ids);
            }
        }
    }
    out
}

fn write_doc_ids(out: &mut Vec<u8>, doc_ids: &[DocId]) {
    out.extend_from_slice(&(doc_ids.len() as u32).to_be_bytes());
    for id in doc_ids {
        out.extend_from_slice(&id.to_be_bytes());
    }
}

/// A cursor over the raw index bytes with bounds-checked reads; every
/// truncation surfaces as `ErrorKind::IndexFormat` rather than panicking.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Reader { data, pos: 0 }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn truncated() -> Error {
        Error::new(ErrorKind::IndexFormat, "unexpected end of INDEX while parsing entry")
    }

    fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.pos + n > self.data.len() {
            return Err(Self::truncated());
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes(bytes.try_into().unwrap()))
    }

    fn read_f64(&mut self) -> Result<f64> {
        let bytes = self.read_bytes(8)?;
        Ok(f64::from_be_bytes(bytes.try_into().unwrap()))
    }

    /// Reads bytes up to (and consuming) the next NUL. Byte-wise, not
    /// character-wise: the key itself may contain any non-NUL byte.
    fn read_until_nul(&mut self) -> Result<&'a [u8]> {
        let start = self.pos;
        loop {
            if self.pos >= self.data.len() {
                return Err(Self::truncated());
            }
            if self.data[self.pos] == NUL {
                let slice = &self.data[start..self.pos];
                self.pos += 1;
                return Ok(slice);
            }
            self.pos += 1;
        }
    }

    fn read_doc_ids(&mut self) -> Result<Vec<DocId>> {
        let n_refs = self.read_u32()?;
        let mut ids = Vec::with_capacity(n_refs as usize);
        for _ in 0..n_refs {
            ids.push(self.read_u32()?);
        }
        Ok(ids)
    }
}

/// Parses the on-disk byte stream back into an `Index`. A partial trailing
/// entry (the stream ends mid-entry) is an `IndexFormat` error.
pub fn deserialize(data: &[u8]) -> Result<Index> {
    let mut reader = Reader::new(data);
    let mut entries = Vec::new();

    while !reader.is_at_end() {
        let key_bytes = reader.read_until_nul()?;
        let path = std::str::from_utf8(key_bytes)
            .map_err(|_| Error::new(ErrorKind::IndexFormat, "entry key is not valid UTF-8"))?
            .to_string();

        let type_byte = *reader.read_bytes(1)?.first().unwrap();
        let value_type = ValueType::from_byte(type_byte)
            .ok_or_else(|| Error::new(ErrorKind::IndexFormat, format!("unknown type byte 0x{type_byte:02x}")))?;

        let value_refs = match value_type {
            ValueType::Float => {
                let n_values = reader.read_u32()?;
                let mut refs = Vec::with_capacity(n_values as usize);
                for _ in 0..n_values {
                    let value = reader.read_f64()?;
                    let doc_ids = reader.read_doc_ids()?;
                    refs.push(ValueRefs { value: Value::Float(value), doc_ids });
                }
                refs
            }
            ValueType::Str => {
                let n_values = reader.read_u32()?;
                let mut refs = Vec::with_capacity(n_values as usize);
                for _ in 0..n_values {
                    let str_bytes = reader.read_until_nul()?;
                    let value = std::str::from_utf8(str_bytes)
                        .map_err(|_| Error::new(ErrorKind::IndexFormat, "string value is not valid UTF-8"))?
                        .to_string();
                    let doc_ids = reader.read_doc_ids()?;
                    refs.push(ValueRefs { value: Value::Str(value), doc_ids });
                }
                refs
            }
            ValueType::Null => {
                let doc_ids = reader.read_doc_ids()?;
                vec![ValueRefs { value: Value::Null, doc_ids }]
            }
        };

        entries.push(Entry { path, value_type, value_refs });
    }

    Ok(Index { entries })
}
