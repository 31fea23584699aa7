//! Lectura de enteros de ancho fijo con control de límites.
//!
//! Todas las lecturas multibyte de los analizadores pasan por estas primitivas.
//! Una lectura que cruce el final del búfer devuelve `0` en lugar de entrar en
//! pánico; quien llama valida la longitud cuando un cero sería ambiguo.

/// Orden de bytes de un campo multibyte.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    #[inline]
    pub fn is_little(self) -> bool {
        matches!(self, Endian::Little)
    }

    #[inline]
    pub fn read_u16(self, buf: &[u8], offset: usize) -> u16 {
        read_u16(buf, offset, self.is_little())
    }

    #[inline]
    pub fn read_u32(self, buf: &[u8], offset: usize) -> u32 {
        read_u32(buf, offset, self.is_little())
    }
}

/// Indica si `width` bytes a partir de `offset` caben dentro de `buf`.
#[inline]
pub fn has_bytes(buf: &[u8], offset: usize, width: usize) -> bool {
    offset
        .checked_add(width)
        .is_some_and(|end| end <= buf.len())
}

#[inline]
pub fn read_u16(buf: &[u8], offset: usize, little_endian: bool) -> u16 {
    let Some(bytes) = window::<2>(buf, offset) else {
        return 0;
    };
    if little_endian {
        u16::from_le_bytes(bytes)
    } else {
        u16::from_be_bytes(bytes)
    }
}

#[inline]
pub fn read_u32(buf: &[u8], offset: usize, little_endian: bool) -> u32 {
    let Some(bytes) = window::<4>(buf, offset) else {
        return 0;
    };
    if little_endian {
        u32::from_le_bytes(bytes)
    } else {
        u32::from_be_bytes(bytes)
    }
}

/// Byte en `offset`, `0` fuera de rango.
#[inline]
pub fn read_u8(buf: &[u8], offset: usize) -> u8 {
    buf.get(offset).copied().unwrap_or(0)
}

fn window<const N: usize>(buf: &[u8], offset: usize) -> Option<[u8; N]> {
    let end = offset.checked_add(N)?;
    buf.get(offset..end)?.try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_both_byte_orders() {
        let data = [0x12, 0x34, 0x56, 0x78];
        assert_eq!(read_u16(&data, 0, true), 0x3412);
        assert_eq!(read_u16(&data, 0, false), 0x1234);
        assert_eq!(read_u32(&data, 0, true), 0x7856_3412);
        assert_eq!(read_u32(&data, 0, false), 0x1234_5678);
        assert_eq!(Endian::Big.read_u16(&data, 2), 0x5678);
    }

    #[test]
    fn out_of_bounds_reads_yield_zero() {
        let data = [0xFF, 0xFF, 0xFF];
        assert_eq!(read_u16(&data, 2, true), 0);
        assert_eq!(read_u32(&data, 0, false), 0);
        assert_eq!(read_u32(&data, usize::MAX - 1, true), 0);
        assert_eq!(read_u8(&data, 3), 0);
        assert_eq!(read_u16(&[], 0, false), 0);
    }

    #[test]
    fn has_bytes_guards_overflow() {
        let data = [0_u8; 8];
        assert!(has_bytes(&data, 4, 4));
        assert!(!has_bytes(&data, 5, 4));
        assert!(!has_bytes(&data, usize::MAX, 2));
    }
}
