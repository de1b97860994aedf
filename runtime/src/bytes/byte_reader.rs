use super::error::CodecError;

/// Bounds-checked cursor over one incoming payload. Every read reports
/// truncation or malformed data as a [`CodecError`] instead of panicking;
/// one bad payload must never take down the dispatch loop.
pub struct ByteReader<'b> {
    buffer: &'b [u8],
    cursor: usize,
}

impl<'b> ByteReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    fn take(&mut self, count: usize) -> Result<&'b [u8], CodecError> {
        if count > self.remaining() {
            return Err(CodecError::UnexpectedEnd {
                needed: count - self.remaining(),
                offset: self.cursor,
            });
        }
        let slice = &self.buffer[self.cursor..self.cursor + count];
        self.cursor += count;
        Ok(slice)
    }

    pub fn read_bool(&mut self) -> Result<bool, CodecError> {
        let offset = self.cursor;
        match self.take(1)?[0] {
            0 => Ok(false),
            1 => Ok(true),
            octet => Err(CodecError::InvalidBool { octet, offset }),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        let bytes = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(raw))
    }

    pub fn read_i8(&mut self) -> Result<i8, CodecError> {
        Ok(self.take(1)?[0] as i8)
    }

    pub fn read_i16(&mut self) -> Result<i16, CodecError> {
        let bytes = self.take(2)?;
        Ok(i16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_i32(&mut self) -> Result<i32, CodecError> {
        let bytes = self.take(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_i64(&mut self) -> Result<i64, CodecError> {
        let bytes = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(i64::from_le_bytes(raw))
    }

    pub fn read_f32(&mut self) -> Result<f32, CodecError> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, CodecError> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    fn read_length(&mut self) -> Result<usize, CodecError> {
        let length = self.read_u32()? as usize;
        if length > self.remaining() {
            return Err(CodecError::LengthOverflow {
                length,
                remaining: self.remaining(),
            });
        }
        Ok(length)
    }

    pub fn read_str(&mut self) -> Result<String, CodecError> {
        let length = self.read_length()?;
        let offset = self.cursor;
        let bytes = self.take(length)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8 { offset })
    }

    pub fn read_bytes(&mut self) -> Result<Vec<u8>, CodecError> {
        let length = self.read_length()?;
        Ok(self.take(length)?.to_vec())
    }
}
