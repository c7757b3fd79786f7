use rand::Rng;

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FRAME_BUFFER_SIZE, GLYPH_HEIGHT, MEMORY_SIZE, STACK_DEPTH,
};
use crate::error::Error;
use crate::machine::Machine;
use crate::opcode::Opcode;

/// 00E0: clear the screen
pub fn clr(machine: &mut Machine, _op: Opcode) -> Result<(), Error> {
    machine.frame_buffer = [0; FRAME_BUFFER_SIZE];
    machine.redraw = true;
    machine.pc += 2;
    Ok(())
}

/// 00EE: PC = STACK.pop()
pub fn rts(machine: &mut Machine, _op: Opcode) -> Result<(), Error> {
    if machine.sp == 0 {
        return Err(Error::StackUnderflow { pc: machine.pc });
    }
    machine.sp -= 1;
    machine.pc = machine.stack[machine.sp as usize] + 2;
    Ok(())
}

/// 1nnn: PC = addr
pub fn jump(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    machine.pc = op.addr;
    Ok(())
}

/// 2nnn: STACK.push(PC); PC = addr
pub fn call(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    if machine.sp as usize == STACK_DEPTH {
        return Err(Error::StackOverflow { pc: machine.pc });
    }
    machine.stack[machine.sp as usize] = machine.pc;
    machine.sp += 1;
    machine.pc = op.addr;
    Ok(())
}

/// 3xkk: if Vx == kk then pc += 2
pub fn ske(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    machine.pc += if machine.v[op.x as usize] == op.kk {
        4
    } else {
        2
    };
    Ok(())
}

/// 4xkk: if Vx != kk then pc += 2
pub fn skne(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    machine.pc += if machine.v[op.x as usize] != op.kk {
        4
    } else {
        2
    };
    Ok(())
}

/// 5xy0: if Vx == Vy then pc += 2
pub fn skre(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    machine.pc += if machine.v[op.x as usize] == machine.v[op.y as usize] {
        4
    } else {
        2
    };
    Ok(())
}

/// 6xkk: Vx = kk
pub fn load(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    machine.v[op.x as usize] = op.kk;
    machine.pc += 2;
    Ok(())
}

/// 7xkk: Vx += kk
/// Overflow is implicitly dropped; the flag register is untouched.
pub fn add(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    machine.v[op.x as usize] = machine.v[op.x as usize].wrapping_add(op.kk);
    machine.pc += 2;
    Ok(())
}

/// 8xy0: Vx = Vy
pub fn mv(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    machine.v[op.x as usize] = machine.v[op.y as usize];
    machine.pc += 2;
    Ok(())
}

/// 8xy1: Vx |= Vy
pub fn or(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    machine.v[op.x as usize] |= machine.v[op.y as usize];
    machine.pc += 2;
    Ok(())
}

/// 8xy2: Vx &= Vy
pub fn and(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    machine.v[op.x as usize] &= machine.v[op.y as usize];
    machine.pc += 2;
    Ok(())
}

/// 8xy3: Vx ^= Vy
pub fn xor(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    machine.v[op.x as usize] ^= machine.v[op.y as usize];
    machine.pc += 2;
    Ok(())
}

/// 8xy4: Vx += Vy; VF = carry
/// VF is written before the destination, so when x is 0xF the sum wins.
pub fn addr(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    let (res, carry) = machine.v[op.x as usize].overflowing_add(machine.v[op.y as usize]);
    machine.v[0xF] = carry as u8;
    machine.v[op.x as usize] = res;
    machine.pc += 2;
    Ok(())
}

/// 8xy5: Vx -= Vy; VF = 1 iff Vx > Vy
/// VF is written before the destination, so when x is 0xF the difference wins.
pub fn sub(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    let vx = machine.v[op.x as usize];
    let vy = machine.v[op.y as usize];
    machine.v[0xF] = (vx > vy) as u8;
    machine.v[op.x as usize] = vx.wrapping_sub(vy);
    machine.pc += 2;
    Ok(())
}

/// 8xy6: Vx >>= 1; VF = the bit shifted out
/// VF is written before the destination, so when x is 0xF the result wins.
pub fn shr(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    let vx = machine.v[op.x as usize];
    machine.v[0xF] = vx & 0x1;
    machine.v[op.x as usize] = vx >> 1;
    machine.pc += 2;
    Ok(())
}

/// 8xy7: Vx = Vy - Vx; VF = 1 iff Vy > Vx
/// VF is written before the destination, so when x is 0xF the difference wins.
pub fn subn(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    let vx = machine.v[op.x as usize];
    let vy = machine.v[op.y as usize];
    machine.v[0xF] = (vy > vx) as u8;
    machine.v[op.x as usize] = vy.wrapping_sub(vx);
    machine.pc += 2;
    Ok(())
}

/// 8xyE: Vx <<= 1; VF = the bit shifted out
/// VF is written before the destination, so when x is 0xF the result wins.
pub fn shl(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    let vx = machine.v[op.x as usize];
    machine.v[0xF] = (vx >> 7) & 0x1;
    machine.v[op.x as usize] = vx << 1;
    machine.pc += 2;
    Ok(())
}

/// 9xy0: if Vx != Vy then pc += 2
pub fn skrne(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    machine.pc += if machine.v[op.x as usize] != machine.v[op.y as usize] {
        4
    } else {
        2
    };
    Ok(())
}

/// Annn: I = addr
pub fn loadi(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    machine.i = op.addr;
    machine.pc += 2;
    Ok(())
}

/// Bnnn: PC = V0 + addr
pub fn jumpi(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    machine.pc = op.addr + u16::from(machine.v[0x0]);
    Ok(())
}

/// Cxkk: Vx = rand_byte & kk
pub fn rand(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    let byte: u8 = machine.rng.gen();
    machine.v[op.x as usize] = byte & op.kk;
    machine.pc += 2;
    Ok(())
}

/// Dxyn: draw_sprite(x=Vx y=Vy rows=n)
/// XORs an n-row sprite from memory[I..] onto the framebuffer at (Vx, Vy).
/// Both axes wrap per pixel, not just at the origin. VF is set iff any lit
/// cell is turned off.
pub fn draw(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    let origin_x = machine.v[op.x as usize] as usize % DISPLAY_WIDTH;
    let origin_y = machine.v[op.y as usize] as usize % DISPLAY_HEIGHT;
    machine.v[0xF] = 0;
    for row in 0..op.n as usize {
        let addr = machine.i as usize + row;
        if addr >= MEMORY_SIZE {
            return Err(Error::MemoryOutOfBounds { addr });
        }
        let bits = machine.memory[addr];
        for col in 0..8 {
            if bits & (0x80 >> col) == 0 {
                continue;
            }
            let x = (origin_x + col) % DISPLAY_WIDTH;
            let y = (origin_y + row) % DISPLAY_HEIGHT;
            let cell = y * DISPLAY_WIDTH + x;
            if machine.frame_buffer[cell] == 1 {
                machine.v[0xF] = 1;
            }
            machine.frame_buffer[cell] ^= 1;
        }
    }
    machine.redraw = true;
    machine.pc += 2;
    Ok(())
}

/// Ex9E: if key[Vx] pressed then pc += 2
/// Only the low nibble of Vx names a key.
pub fn skpr(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    machine.pc += if machine.keys[(machine.v[op.x as usize] & 0xF) as usize] {
        4
    } else {
        2
    };
    Ok(())
}

/// ExA1: if !key[Vx] pressed then pc += 2
/// Only the low nibble of Vx names a key.
pub fn skup(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    machine.pc += if machine.keys[(machine.v[op.x as usize] & 0xF) as usize] {
        2
    } else {
        4
    };
    Ok(())
}

/// Fx07: Vx = DT
pub fn moved(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    machine.v[op.x as usize] = machine.delay_timer;
    machine.pc += 2;
    Ok(())
}

/// Fx0A: await a keypress, Vx = the lowest pressed key
/// With no key held the pc is left alone, so the same instruction is fetched
/// again on the next step; the driver keeps ticking timers in between.
pub fn keyd(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    for key in 0..machine.keys.len() {
        if machine.keys[key] {
            machine.v[op.x as usize] = key as u8;
            machine.pc += 2;
            break;
        }
    }
    Ok(())
}

/// Fx15: DT = Vx
pub fn loads(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    machine.delay_timer = machine.v[op.x as usize];
    machine.pc += 2;
    Ok(())
}

/// Fx18: ST = Vx
pub fn ld(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    machine.sound_timer = machine.v[op.x as usize];
    machine.pc += 2;
    Ok(())
}

/// Fx1E: I += Vx; VF = 1 iff the sum leaves the addressable range
pub fn addi(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    let sum = u32::from(machine.i) + u32::from(machine.v[op.x as usize]);
    machine.v[0xF] = (sum > 0xFFF) as u8;
    machine.i = sum as u16;
    machine.pc += 2;
    Ok(())
}

/// Fx29: I = Vx * 5
/// Points I at the built-in glyph for the digit in Vx; each glyph is 5 bytes.
pub fn ldspr(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    machine.i = u16::from(machine.v[op.x as usize]) * GLYPH_HEIGHT as u16;
    machine.pc += 2;
    Ok(())
}

/// Fx33: mem[I..I+3] = the decimal digits of Vx, hundreds first
pub fn bcd(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    let start = machine.i as usize;
    let end = start + 3;
    if end > MEMORY_SIZE {
        return Err(Error::MemoryOutOfBounds { addr: end - 1 });
    }
    let vx = machine.v[op.x as usize];
    machine.memory[start..end].copy_from_slice(&[vx / 100, vx / 10 % 10, vx % 10]);
    machine.pc += 2;
    Ok(())
}

/// Fx55: mem[I..=I+x] = V0..=Vx; I += x + 1
pub fn stor(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    let x = op.x as usize;
    let start = machine.i as usize;
    let end = start + x + 1;
    if end > MEMORY_SIZE {
        return Err(Error::MemoryOutOfBounds { addr: end - 1 });
    }
    machine.memory[start..end].copy_from_slice(&machine.v[..=x]);
    machine.i += op.x as u16 + 1;
    machine.pc += 2;
    Ok(())
}

/// Fx65: V0..=Vx = mem[I..=I+x]; I += x + 1
pub fn read(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    let x = op.x as usize;
    let start = machine.i as usize;
    let end = start + x + 1;
    if end > MEMORY_SIZE {
        return Err(Error::MemoryOutOfBounds { addr: end - 1 });
    }
    machine.v[..=x].copy_from_slice(&machine.memory[start..end]);
    machine.i += op.x as u16 + 1;
    machine.pc += 2;
    Ok(())
}

/// Any family/modifier combination with no routine: record the word for
/// observability and skip it, so execution cannot hang on a single
/// unrecognized instruction.
pub fn undefined(machine: &mut Machine, op: Opcode) -> Result<(), Error> {
    log::warn!("undefined opcode {:04X} at {:04X}", op.word, machine.pc);
    machine.last_undefined = Some(op.word);
    machine.pc += 2;
    Ok(())
}
