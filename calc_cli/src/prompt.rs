//! Line-by-line form prompts.
//!
//! Prompts go to the given writer (stderr in the binary) and answers are read
//! as raw text; parsing and defaults are left to `calc_core::parsing`.

use std::io::{self, BufRead, Write};

use calc_core::calculations::load::{EquipmentField, EquipmentRow};
use calc_core::parsing::FieldText;
use calc_core::reference::FuelKind;
use calc_core::FuelAmounts;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Ask one question; end of input reads as a blank answer
    pub fn ask(&mut self, prompt: &str) -> io::Result<FieldText> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(FieldText::new(line.trim()))
    }

    /// Fill every field of every row, in form order
    pub fn fill_rows(&mut self, rows: &mut [EquipmentRow]) -> io::Result<()> {
        for row in rows.iter_mut() {
            writeln!(self.output, "{}. {}", row.id, row.name)?;
            for field in EquipmentField::ALL {
                let default = field.role().default_value();
                let text = self.ask(&format!("   {} [{}]: ", field.label(), default))?;
                row.set_field(field, text);
            }
        }
        Ok(())
    }

    /// Ask for the burned amount of every fuel
    pub fn fill_fuels(&mut self, fuels: &mut FuelAmounts) -> io::Result<()> {
        for kind in FuelKind::ALL {
            let text = self.ask(&format!("{} burned, {} [0]: ", kind.display_name(), kind.quantity_unit()))?;
            fuels.set_amount(kind, text);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_fill_rows_in_field_order() {
        let answers = "0.9\n0.8\n0.38\n3\n10\n0.6\n0.75\n";
        let mut output = Vec::new();
        let mut rows = vec![EquipmentRow::new(1, "Grinding machine")];

        Prompter::new(Cursor::new(answers), &mut output)
            .fill_rows(&mut rows)
            .unwrap();

        assert_eq!(rows[0].efficiency.as_str(), "0.9");
        assert_eq!(rows[0].voltage.as_str(), "0.38");
        assert_eq!(rows[0].count.as_str(), "3");
        assert_eq!(rows[0].reactive_factor.as_str(), "0.75");

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("1. Grinding machine"));
        assert!(shown.contains("η (efficiency) [1]: "));
        assert!(shown.contains("n (number of receivers) [0]: "));
    }

    #[test]
    fn test_end_of_input_leaves_blanks() {
        let mut rows = vec![EquipmentRow::new(1, "Press"), EquipmentRow::new(2, "Fan")];
        Prompter::new(Cursor::new("\n  \n"), io::sink())
            .fill_rows(&mut rows)
            .unwrap();
        assert!(rows.iter().all(|r| r.is_blank()));
    }

    #[test]
    fn test_fill_fuels() {
        let mut fuels = FuelAmounts::default();
        Prompter::new(Cursor::new("1000\n\n84762\n"), io::sink())
            .fill_fuels(&mut fuels)
            .unwrap();
        assert_eq!(fuels.coal.as_str(), "1000");
        assert!(fuels.fuel_oil.is_blank());
        assert_eq!(fuels.natural_gas.value(), Some(84762.0));
    }
}
