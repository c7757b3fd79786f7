use crate::opcode::Opcode;

/// Renders an opcode as conventional Chip-8 assembly, e.g. `JP 2A0` or
/// `SE V1 2A`. Unrecognized words render as `UNDEFINED`.
///
/// Purely presentational; execution never consults this.
pub fn disassemble(op: Opcode) -> String {
    match op.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => "CLS".to_string(),
        (0x0, 0x0, 0xE, 0xE) => "RET".to_string(),
        (0x1, ..) => format!("JP {:03X}", op.addr),
        (0x2, ..) => format!("CALL {:03X}", op.addr),
        (0x3, ..) => format!("SE V{:01X} {:02X}", op.x, op.kk),
        (0x4, ..) => format!("SNE V{:01X} {:02X}", op.x, op.kk),
        (0x5, .., 0x0) => format!("SE V{:01X} V{:01X}", op.x, op.y),
        (0x6, ..) => format!("LD V{:01X} {:02X}", op.x, op.kk),
        (0x7, ..) => format!("ADD V{:01X} {:02X}", op.x, op.kk),
        (0x8, .., 0x0) => format!("LD V{:01X} V{:01X}", op.x, op.y),
        (0x8, .., 0x1) => format!("OR V{:01X} V{:01X}", op.x, op.y),
        (0x8, .., 0x2) => format!("AND V{:01X} V{:01X}", op.x, op.y),
        (0x8, .., 0x3) => format!("XOR V{:01X} V{:01X}", op.x, op.y),
        (0x8, .., 0x4) => format!("ADD V{:01X} V{:01X}", op.x, op.y),
        (0x8, .., 0x5) => format!("SUB V{:01X} V{:01X}", op.x, op.y),
        (0x8, .., 0x6) => format!("SHR V{:01X}", op.x),
        (0x8, .., 0x7) => format!("SUBN V{:01X} V{:01X}", op.x, op.y),
        (0x8, .., 0xE) => format!("SHL V{:01X}", op.x),
        (0x9, .., 0x0) => format!("SNE V{:01X} V{:01X}", op.x, op.y),
        (0xA, ..) => format!("LD I {:03X}", op.addr),
        (0xB, ..) => format!("JP V0 {:03X}", op.addr),
        (0xC, ..) => format!("RND V{:01X} {:02X}", op.x, op.kk),
        (0xD, ..) => format!("DRW V{:01X} V{:01X} {:01X}", op.x, op.y, op.n),
        (0xE, _, 0x9, 0xE) => format!("SKP V{:01X}", op.x),
        (0xE, _, 0xA, 0x1) => format!("SKNP V{:01X}", op.x),
        (0xF, _, 0x0, 0x7) => format!("LD V{:01X} DT", op.x),
        (0xF, _, 0x0, 0xA) => format!("LD V{:01X} K", op.x),
        (0xF, _, 0x1, 0x5) => format!("LD DT V{:01X}", op.x),
        (0xF, _, 0x1, 0x8) => format!("LD ST V{:01X}", op.x),
        (0xF, _, 0x1, 0xE) => format!("ADD I V{:01X}", op.x),
        (0xF, _, 0x2, 0x9) => format!("LD F V{:01X}", op.x),
        (0xF, _, 0x3, 0x3) => format!("LD B V{:01X}", op.x),
        (0xF, _, 0x5, 0x5) => format!("LD [I] V{:01X}", op.x),
        (0xF, _, 0x6, 0x5) => format!("LD V{:01X} [I]", op.x),
        _ => "UNDEFINED".to_string(),
    }
}

#[cfg(test)]
mod test_disasm {
    use super::*;

    fn dis(word: u16) -> String {
        disassemble(Opcode::decode(word))
    }

    #[test]
    fn test_fixed_function_opcodes() {
        assert_eq!(dis(0x00E0), "CLS");
        assert_eq!(dis(0x00EE), "RET");
    }

    #[test]
    fn test_operand_formatting() {
        assert_eq!(dis(0x1ABC), "JP ABC");
        assert_eq!(dis(0x3A0F), "SE VA 0F");
        assert_eq!(dis(0x8121), "OR V1 V2");
        assert_eq!(dis(0xD125), "DRW V1 V2 5");
        assert_eq!(dis(0xF155), "LD [I] V1");
    }

    #[test]
    fn test_unknown_words() {
        assert_eq!(dis(0x0ABC), "UNDEFINED");
        assert_eq!(dis(0x8FFF), "UNDEFINED");
        assert_eq!(dis(0xFFFF), "UNDEFINED");
    }
}
