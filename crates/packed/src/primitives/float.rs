//! IEEE-754 floating point coders.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

#[derive(Debug, Clone, Copy)]
pub struct FloatCoder {
    pub bits: u8, // 32 or 64
    pub little_endian: bool,
}

impl Coder for FloatCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let n = match value {
            Value::Float(f) => *f,
            Value::Int(i) => *i as f64,
            Value::UInt(u) => *u as f64,
            other => {
                return Err(Error::new(
                    w.labels.clone(),
                    ErrorKind::NotANumber(other.type_name()),
                ))
            }
        };

        if self.bits == 32 {
            let mut buf = [0u8; 4];
            if self.little_endian {
                LittleEndian::write_f32(&mut buf, n as f32);
            } else {
                BigEndian::write_f32(&mut buf, n as f32);
            }
            w.bytes(&buf)
        } else {
            let mut buf = [0u8; 8];
            if self.little_endian {
                LittleEndian::write_f64(&mut buf, n);
            } else {
                BigEndian::write_f64(&mut buf, n);
            }
            w.bytes(&buf)
        }
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        if self.bits == 32 {
            let buf = r.bytes(4, false)?;
            let f = if self.little_endian {
                LittleEndian::read_f32(buf)
            } else {
                BigEndian::read_f32(buf)
            };
            Ok(Value::Float(f as f64))
        } else {
            let buf = r.bytes(8, false)?;
            let f = if self.little_endian {
                LittleEndian::read_f64(buf)
            } else {
                BigEndian::read_f64(buf)
            };
            Ok(Value::Float(f))
        }
    }

    fn size(&self) -> Option<usize> {
        Some((self.bits / 8) as usize)
    }
}

pub fn float32(little_endian: bool) -> BoxCoder {
    Box::new(FloatCoder {
        bits: 32,
        little_endian,
    })
}

pub fn float64(little_endian: bool) -> BoxCoder {
    Box::new(FloatCoder {
        bits: 64,
        little_endian,
    })
}

pub const F32LE: FloatCoder = FloatCoder {
    bits: 32,
    little_endian: true,
};
pub const F32BE: FloatCoder = FloatCoder {
    bits: 32,
    little_endian: false,
};
pub const F64LE: FloatCoder = FloatCoder {
    bits: 64,
    little_endian: true,
};
pub const F64BE: FloatCoder = FloatCoder {
    bits: 64,
    little_endian: false,
};
