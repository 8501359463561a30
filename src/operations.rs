use crate::constants::{DISPLAY_HEIGHT, DISPLAY_SIZE, DISPLAY_WIDTH, SPRITE_HEIGHT};
use crate::error::Result;
use crate::state::State;

/// What the cycle driver should do once an operation returns.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// The instruction completed; tick the timers.
    Next,
    /// FX0A found no key held; end the cycle without ticking the timers.
    AwaitingKey,
}

fn skip_if(state: &mut State, condition: bool) -> Result<Flow> {
    if condition {
        state.pc = state.pc.wrapping_add(2);
    }
    Ok(Flow::Next)
}

/// clear
pub fn clr(state: &mut State) -> Result<Flow> {
    state.frame_buffer = [0; DISPLAY_SIZE];
    state.draw_flag = true;
    Ok(Flow::Next)
}

/// PC = STACK.pop()
pub fn rts(state: &mut State) -> Result<Flow> {
    state.pc = state.stack.pop()?;
    Ok(Flow::Next)
}

/// Machine code routine at addr; not emulated
pub fn sys(_state: &mut State) -> Result<Flow> {
    Ok(Flow::Next)
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) -> Result<Flow> {
    state.pc = addr;
    Ok(Flow::Next)
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, addr: u16) -> Result<Flow> {
    state.stack.push(state.pc)?;
    state.pc = addr;
    Ok(Flow::Next)
}

/// if Vx == nn then pc += 2
pub fn ske(state: &mut State, x: usize, nn: u8) -> Result<Flow> {
    let condition = state.v[x] == nn;
    skip_if(state, condition)
}

/// if Vx != nn then pc += 2
pub fn skne(state: &mut State, x: usize, nn: u8) -> Result<Flow> {
    let condition = state.v[x] != nn;
    skip_if(state, condition)
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: usize, y: usize) -> Result<Flow> {
    let condition = state.v[x] == state.v[y];
    skip_if(state, condition)
}

/// Vx = nn
pub fn load(state: &mut State, x: usize, nn: u8) -> Result<Flow> {
    state.v[x] = nn;
    Ok(Flow::Next)
}

/// Vx += nn
/// Wraps on overflow and leaves VF alone
pub fn add(state: &mut State, x: usize, nn: u8) -> Result<Flow> {
    state.v[x] = state.v[x].wrapping_add(nn);
    Ok(Flow::Next)
}

/// Vx = Vy
pub fn mv(state: &mut State, x: usize, y: usize) -> Result<Flow> {
    state.v[x] = state.v[y];
    Ok(Flow::Next)
}

/// Vx |= Vy
pub fn or(state: &mut State, x: usize, y: usize) -> Result<Flow> {
    state.v[x] |= state.v[y];
    Ok(Flow::Next)
}

/// Vx &= Vy
pub fn and(state: &mut State, x: usize, y: usize) -> Result<Flow> {
    state.v[x] &= state.v[y];
    Ok(Flow::Next)
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: usize, y: usize) -> Result<Flow> {
    state.v[x] ^= state.v[y];
    Ok(Flow::Next)
}

/// Vx += Vy; VF = carry
pub fn addr(state: &mut State, x: usize, y: usize) -> Result<Flow> {
    let (res, carry) = state.v[x].overflowing_add(state.v[y]);
    state.v[0xF] = u8::from(carry);
    state.v[x] = res;
    Ok(Flow::Next)
}

/// Vx -= Vy; VF = !borrow
pub fn sub(state: &mut State, x: usize, y: usize) -> Result<Flow> {
    let (res, borrow) = state.v[x].overflowing_sub(state.v[y]);
    state.v[0xF] = u8::from(!borrow);
    state.v[x] = res;
    Ok(Flow::Next)
}

/// Vx >>= 1; VF = bit shifted out
pub fn shr(state: &mut State, x: usize, _y: usize) -> Result<Flow> {
    let vx = state.v[x];
    state.v[0xF] = vx & 0x1;
    state.v[x] = vx >> 1;
    Ok(Flow::Next)
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(state: &mut State, x: usize, y: usize) -> Result<Flow> {
    let (res, borrow) = state.v[y].overflowing_sub(state.v[x]);
    state.v[0xF] = u8::from(!borrow);
    state.v[x] = res;
    Ok(Flow::Next)
}

/// Vx <<= 1; VF = bit shifted out
pub fn shl(state: &mut State, x: usize, _y: usize) -> Result<Flow> {
    let vx = state.v[x];
    state.v[0xF] = vx >> 7;
    state.v[x] = vx << 1;
    Ok(Flow::Next)
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &mut State, x: usize, y: usize) -> Result<Flow> {
    let condition = state.v[x] != state.v[y];
    skip_if(state, condition)
}

/// I = addr
pub fn loadi(state: &mut State, addr: u16) -> Result<Flow> {
    state.i = addr;
    Ok(Flow::Next)
}

/// PC = V0 + addr
pub fn jumpi(state: &mut State, addr: u16) -> Result<Flow> {
    state.pc = addr + u16::from(state.v[0x0]);
    Ok(Flow::Next)
}

/// Vx = rand_byte & nn
pub fn rand(state: &mut State, x: usize, nn: u8) -> Result<Flow> {
    state.v[x] = state.random_byte() & nn;
    Ok(Flow::Next)
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the n-byte sprite at I onto the FrameBuffer at (Vx, Vy).
///
/// Only the starting position wraps; pixels that would land past the right or bottom
/// edge are clipped. VF is set if any lit pixel is erased.
pub fn draw(state: &mut State, x: usize, y: usize, n: u8) -> Result<Flow> {
    let origin_x = usize::from(state.v[x]) % DISPLAY_WIDTH;
    let origin_y = usize::from(state.v[y]) % DISPLAY_HEIGHT;

    let mut sprite = [0u8; 16];
    let rows = usize::from(n);
    sprite[..rows].copy_from_slice(state.read(usize::from(state.i), rows)?);

    state.v[0xF] = 0x0;
    for (row, byte) in sprite[..rows].iter().enumerate() {
        let py = origin_y + row;
        if py >= DISPLAY_HEIGHT {
            break;
        }
        for bit in 0..8 {
            let px = origin_x + bit;
            if px >= DISPLAY_WIDTH {
                break;
            }
            if byte & (0x80 >> bit) == 0 {
                continue;
            }
            let cell = &mut state.frame_buffer[py * DISPLAY_WIDTH + px];
            if *cell == 1 {
                state.v[0xF] = 0x1;
            }
            *cell ^= 1;
        }
    }

    state.draw_flag = true;
    Ok(Flow::Next)
}

fn key_pressed(state: &State, x: usize) -> bool {
    state
        .keys
        .get(usize::from(state.v[x]))
        .copied()
        .unwrap_or(false)
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, x: usize) -> Result<Flow> {
    let condition = key_pressed(state, x);
    skip_if(state, condition)
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, x: usize) -> Result<Flow> {
    let condition = !key_pressed(state, x);
    skip_if(state, condition)
}

/// Vx = DT
pub fn moved(state: &mut State, x: usize) -> Result<Flow> {
    state.v[x] = state.delay_timer;
    Ok(Flow::Next)
}

/// Vx = last pressed key in scan order
/// Reports `AwaitingKey` if nothing is held
pub fn keyd(state: &mut State, x: usize) -> Result<Flow> {
    match state.keys.iter().rposition(|&pressed| pressed) {
        Some(key) => {
            state.v[x] = key as u8;
            Ok(Flow::Next)
        }
        None => Ok(Flow::AwaitingKey),
    }
}

/// DT = Vx
pub fn loads(state: &mut State, x: usize) -> Result<Flow> {
    state.delay_timer = state.v[x];
    Ok(Flow::Next)
}

/// ST = Vx
pub fn ld(state: &mut State, x: usize) -> Result<Flow> {
    state.sound_timer = state.v[x];
    Ok(Flow::Next)
}

/// I += Vx; VF = I > 0xFFF
/// I is not masked back into 12 bits
pub fn addi(state: &mut State, x: usize) -> Result<Flow> {
    state.i = state.i.wrapping_add(u16::from(state.v[x]));
    state.v[0xF] = u8::from(state.i > 0xFFF);
    Ok(Flow::Next)
}

/// I = Vx * 5
/// Points I at the sprite sheet glyph for the digit in Vx
pub fn ldspr(state: &mut State, x: usize) -> Result<Flow> {
    state.i = u16::from(state.v[x]) * SPRITE_HEIGHT;
    Ok(Flow::Next)
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd(state: &mut State, x: usize) -> Result<Flow> {
    let vx = state.v[x];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    state
        .write(usize::from(state.i), digits.len())?
        .copy_from_slice(&digits);
    Ok(Flow::Next)
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &mut State, x: usize) -> Result<Flow> {
    let registers = state.v;
    state
        .write(usize::from(state.i), x + 1)?
        .copy_from_slice(&registers[..=x]);
    Ok(Flow::Next)
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &mut State, x: usize) -> Result<Flow> {
    let mut registers = state.v;
    registers[..=x].copy_from_slice(state.read(usize::from(state.i), x + 1)?);
    state.v = registers;
    Ok(Flow::Next)
}
