//! The pretty print implementation of the [`ChipSet`](super::ChipSet).
//! This implementation was split up into this file for smaller file sizes and higher
//! cohesion.

use std::fmt::{self, Write};

use once_cell::sync::Lazy;

use super::ChipSet;
use crate::{
    definitions::{cpu, memory},
    devices::{DisplayCommands, KeyboardCommands, SoundCommands},
    opcode,
};

/// The amount of values printed on a single row, a memory
/// row covers twice as many bytes as every opcode is made up of two.
const HEX_PRINT_STEP: usize = 8;

const END_OF_LINE: char = '\n';
const INDENT_FILLAMENT: char = '\t';
const INDENT_SIZE: usize = 2;

/// The formatted integer will be 2 symbols for the prefix (0x)
/// and 4 for the rest long.
macro_rules! intformat {
    () => {
        "{:#06X}"
    };
}

const INTSIZE: usize = 6;

/// `0x0000 - 0x0000 :`
const POINTER_LEN: usize = 2 * INTSIZE + 5;

/// a line length (This is a bit bigger then the actual line will be)
const LENLINE: usize = INDENT_SIZE + POINTER_LEN + 1 + HEX_PRINT_STEP * (INTSIZE + 1);

/// The values that are used when there are rows of only zeros.
const FILLER_BASE: &str = "...";

/// Prepares the line that will be used for rows of only zeros.
static ZERO_FILLER: Lazy<String> = Lazy::new(|| {
    let zero = format!(intformat!(), 0);
    let length = INTSIZE * (HEX_PRINT_STEP - 2) + (HEX_PRINT_STEP - 1) - FILLER_BASE.len();
    let filler = " ".repeat(length / 2);
    format!("{zero}{filler}{FILLER_BASE}{filler}{zero}")
});

/// Will add an indent
fn indent_helper(text: &mut String, indent: usize) {
    for _ in 0..indent {
        text.push(INDENT_FILLAMENT);
    }
}

/// will format the pointers according to definition
fn pointer_formatter(line: &mut String, from: usize, to: usize) -> fmt::Result {
    write!(
        line,
        concat!(intformat!(), " - ", intformat!(), " :"),
        from, to
    )
}

/// will pretty print a single indented value
fn single_printer<T: fmt::UpperHex>(value: T, indent: usize) -> Result<String, fmt::Error> {
    let mut res = String::with_capacity(indent + INTSIZE);
    indent_helper(&mut res, indent);
    write!(res, intformat!(), value)?;
    Ok(res)
}

/// will pretty print all the integer data given
fn integer_printer<T: fmt::UpperHex>(data: &[T], indent: usize) -> Result<String, fmt::Error> {
    let mut res = String::with_capacity(LENLINE * (data.len() / HEX_PRINT_STEP + 1));

    for (row, chunk) in data.chunks(HEX_PRINT_STEP).enumerate() {
        let from = row * HEX_PRINT_STEP;
        indent_helper(&mut res, indent);
        pointer_formatter(&mut res, from, from + chunk.len() - 1)?;

        for entry in chunk {
            write!(res, concat!(" ", intformat!()), entry)?;
        }
        res.push(END_OF_LINE);
    }

    // Remove unneeded new line
    res.pop();
    Ok(res)
}

/// A single row of opcodes (only in this context)
struct Row {
    from: usize,
    to: usize,
    data: [opcode::Opcode; HEX_PRINT_STEP],
    only_null: bool,
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut res = String::with_capacity(LENLINE);
        pointer_formatter(&mut res, self.from, self.to)?;
        res.push(' ');

        if self.only_null {
            res.push_str(&ZERO_FILLER);
        } else {
            for (index, entry) in self.data.iter().enumerate() {
                if index > 0 {
                    res.push(' ');
                }
                write!(res, intformat!(), entry)?;
            }
        }
        f.write_str(&res)
    }
}

/// will pretty print the content of the raw memory, consecutive rows of
/// only zeros are merged into a single one.
fn memory_printer(data: &[u8], indent: usize) -> Result<String, fmt::Error> {
    const POINTER_INCREMENT: usize = HEX_PRINT_STEP * memory::opcodes::SIZE;

    let mut rows: Vec<Row> = Vec::with_capacity(data.len() / POINTER_INCREMENT);

    for from in (0..data.len()).step_by(POINTER_INCREMENT) {
        let to = (from + POINTER_INCREMENT).min(data.len()) - 1;

        let mut row = Row {
            from,
            to,
            data: [0; HEX_PRINT_STEP],
            only_null: true,
        };
        for (entry, index) in row.data.iter_mut().zip((from..to).step_by(memory::opcodes::SIZE)) {
            *entry = opcode::build_opcode(data, index).map_err(|_| fmt::Error)?;
            row.only_null &= *entry == 0;
        }

        match rows.last_mut() {
            Some(last) if last.only_null && row.only_null => last.to = row.to,
            _ => rows.push(row),
        }
    }

    let mut res = String::with_capacity((LENLINE + 1) * rows.len());
    for row in rows {
        indent_helper(&mut res, indent);
        write!(res, "{}{}", row, END_OF_LINE)?;
    }
    res.pop();
    Ok(res)
}

impl<D, S, K> fmt::Display for ChipSet<D, S, K>
where
    D: DisplayCommands,
    S: SoundCommands,
    K: KeyboardCommands,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut nam = String::with_capacity(INDENT_SIZE + self.name.len());
        indent_helper(&mut nam, INDENT_SIZE);
        nam.push_str(&self.name);

        let mut mod_ = String::new();
        indent_helper(&mut mod_, INDENT_SIZE);
        let resolution = if self.high_resolution { "high" } else { "low" };
        write!(mod_, "{:?} ({} resolution) {:?}", self.mode, resolution, self.state)?;

        let opc = single_printer(self.opcode, INDENT_SIZE)?;
        let prc = single_printer(self.program_counter, INDENT_SIZE)?;
        let idx = single_printer(self.index_register, INDENT_SIZE)?;
        let tim = integer_printer(&[self.delay_timer, self.sound_timer], INDENT_SIZE)?;
        let mem = memory_printer(&self.memory, INDENT_SIZE)?;

        // the stack is filled up so it always has the same shape
        let mut stack = [0; cpu::stack::SIZE];
        stack[..self.stack.len()].copy_from_slice(&self.stack);
        let sta = integer_printer(&stack, INDENT_SIZE)?;

        let reg = integer_printer(&self.registers, INDENT_SIZE)?;
        let fla = integer_printer(&self.flag_registers, INDENT_SIZE)?;

        write!(
            f,
            "Chipset {{\n\
                \tProgram Name :\n{}\n\
                \tMode :\n{}\n\
                \tOpcode :\n{}\n\
                \tProgram Counter :\n{}\n\
                \tIndex Register :\n{}\n\
                \tTimer (delay, sound) :\n{}\n\
                \tMemory :\n{}\n\
                \tStack :\n{}\n\
                \tRegister :\n{}\n\
                \tFlag Register :\n{}\n\
                }}",
            nam, mod_, opc, prc, idx, tim, mem, sta, reg, fla
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{super::tests, *};

    const OUTPUT_PRINT: &str = "\
        Chipset {\n\
            \tProgram Name :\n\
                \t\tMAZE\n\
            \tMode :\n\
                \t\tSuperChip (low resolution) Running\n\
            \tOpcode :\n\
                \t\t0x0000\n\
            \tProgram Counter :\n\
                \t\t0x0200\n\
            \tIndex Register :\n\
                \t\t0x0000\n\
            \tTimer (delay, sound) :\n\
                \t\t0x0000 - 0x0001 : 0x0000 0x0000\n\
            \tMemory :\n\
                \t\t0x0000 - 0x000F : 0xF090 0x9090 0xF020 0x6020 0x2070 0xF010 0xF080 0xF0F0\n\
                \t\t0x0010 - 0x001F : 0x10F0 0x10F0 0x9090 0xF010 0x10F0 0x80F0 0x10F0 0xF080\n\
                \t\t0x0020 - 0x002F : 0xF090 0xF0F0 0x1020 0x4040 0xF090 0xF090 0xF0F0 0x90F0\n\
                \t\t0x0030 - 0x003F : 0x10F0 0xF090 0xF090 0x90E0 0x90E0 0x90E0 0xF080 0x8080\n\
                \t\t0x0040 - 0x004F : 0xF0E0 0x9090 0x90E0 0xF080 0xF080 0xF0F0 0x80F0 0x8080\n\
                \t\t0x0050 - 0x007F : 0x0000                    ...                    0x0000\n\
                \t\t0x0080 - 0x008F : 0x3C7E 0xE7C3 0xC3C3 0xC3E7 0x7E3C 0x1838 0x5818 0x1818\n\
                \t\t0x0090 - 0x009F : 0x1818 0x183C 0x3E7F 0xC306 0x0C18 0x3060 0xFFFF 0x3C7E\n\
                \t\t0x00A0 - 0x00AF : 0xC303 0x0E0E 0x03C3 0x7E3C 0x060E 0x1E36 0x66C6 0xFFFF\n\
                \t\t0x00B0 - 0x00BF : 0x0606 0xFFFF 0xC0C0 0xFCFE 0x03C3 0x7E3C 0x3E7C 0xC0C0\n\
                \t\t0x00C0 - 0x00CF : 0xFCFE 0xC3C3 0x7E3C 0xFFFF 0x0306 0x0C18 0x3060 0x6060\n\
                \t\t0x00D0 - 0x00DF : 0x3C7E 0xC3C3 0x7E7E 0xC3C3 0x7E3C 0x3C7E 0xC3C3 0x7F3F\n\
                \t\t0x00E0 - 0x00EF : 0x0303 0x3E7C 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
                \t\t0x00F0 - 0x01FF : 0x0000                    ...                    0x0000\n\
                \t\t0x0200 - 0x020F : 0x6000 0x6100 0xA222 0xC201 0x3201 0xA21E 0xD014 0x7004\n\
                \t\t0x0210 - 0x021F : 0x3040 0x1204 0x6000 0x7104 0x3120 0x1204 0x121C 0x8040\n\
                \t\t0x0220 - 0x022F : 0x2010 0x2040 0x8010 0x0000 0x0000 0x0000 0x0000 0x0000\n\
                \t\t0x0230 - 0x0FFF : 0x0000                    ...                    0x0000\n\
            \tStack :\n\
                \t\t0x0000 - 0x0007 : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
                \t\t0x0008 - 0x000F : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
            \tRegister :\n\
                \t\t0x0000 - 0x0007 : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
                \t\t0x0008 - 0x000F : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
            \tFlag Register :\n\
                \t\t0x0000 - 0x0007 : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
        }";

    #[test]
    /// tests if the pretty print output is as expected
    fn test_full_print() {
        let chip = tests::get_default_chip();

        let actual_full = format!("{}", chip);
        let actual_split = actual_full.split('\n');
        let expected = OUTPUT_PRINT.split('\n');

        for (exp, act) in expected.zip(actual_split) {
            assert_eq!(exp, act);
        }
        assert_eq!(OUTPUT_PRINT.lines().count(), actual_full.lines().count());
    }

    #[test]
    fn test_print_stack() {
        let mut chip = tests::get_default_chip();
        chip.push_stack(0x234).expect("The stack is empty.");
        chip.push_stack(0x456).expect("The stack has room.");

        let actual = format!("{}", chip);
        assert!(actual.contains(
            "\t\t0x0000 - 0x0007 : 0x0234 0x0456 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
             \t\t0x0008 - 0x000F"
        ));
    }

    #[test]
    fn test_zero_filler() {
        assert_eq!(
            *ZERO_FILLER,
            "0x0000                    ...                    0x0000"
        );
    }
}
