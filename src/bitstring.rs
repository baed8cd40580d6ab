use std::iter;

use tracing::warn;

use crate::error::Error;
use crate::params::Param;
use crate::rules::Section;
use crate::symbols::SymbolAllocator;

/// Width of one encoding word.
pub const SECTION_BITS: usize = 32;

/// Marker for an unconstrained bit in a rendered pattern.
pub const FILLER: char = '-';

/// Symbolic pattern for one section, built from the high end inward: cell 0
/// is the most significant bit placed so far. The buffer grows as fields are
/// placed and may legitimately exceed 32 cells when the declared widths do.
#[derive(Debug, Default)]
pub struct SectionPattern {
    cells: Vec<char>,
}

impl SectionPattern {
    pub fn new() -> Self {
        Self {
            cells: Vec::with_capacity(SECTION_BITS),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Merges `width` copies of `symbol` with the field's low bit at
    /// `offset`. Exactly one of three cases applies:
    ///
    /// - the buffer already reaches below `offset`: the overlapping low
    ///   portion of earlier, higher-offset fields is cut and the new span
    ///   takes its place;
    /// - the buffer stops above `offset`: filler bridges the gap and the
    ///   span goes on top;
    /// - the buffer stops exactly at `offset`: the span goes on top.
    pub fn place(&mut self, symbol: char, offset: usize, width: usize) {
        let len = self.cells.len();
        if offset < len {
            let cut = (len - offset).min(width);
            let at = len - offset - cut;
            self.cells.splice(at..at + cut, iter::repeat(symbol).take(width));
        } else if offset > len {
            self.cells.splice(
                0..0,
                iter::repeat(symbol)
                    .take(width)
                    .chain(iter::repeat(FILLER).take(offset - len)),
            );
        } else {
            self.cells.splice(0..0, iter::repeat(symbol).take(width));
        }
    }

    /// Front-pads with filler up to 32 cells. Over-length buffers are left
    /// alone; the downstream matcher treats those as a caller error.
    pub fn pad_to_section(&mut self) {
        let len = self.cells.len();
        if len < SECTION_BITS {
            self.cells
                .splice(0..0, iter::repeat(FILLER).take(SECTION_BITS - len));
        }
    }

    pub fn render(&self) -> String {
        self.cells.iter().collect()
    }
}

/// Everything one section contributes to the generated artifact.
#[derive(Debug)]
pub struct AssembledSection {
    /// The symbolic bit pattern, at least 32 characters.
    pub pattern: String,
    /// Symbol label -> field name, in processing order, for the comment block.
    pub notes: Vec<(String, String)>,
    /// (global bit offset, handler parameter) pairs for the argument orderer.
    pub args: Vec<(usize, Param)>,
}

/// Folds one section's fields into its pattern. `multiplier` is the
/// section's significance multiplier: N-1-i for section i of N, so the
/// first-declared section lands in the highest bits of the instruction.
pub fn assemble_section(
    instruction: &str,
    section: &Section,
    multiplier: usize,
    symbols: &mut SymbolAllocator,
) -> Result<AssembledSection, Error> {
    let mut pattern = SectionPattern::new();
    let mut notes = Vec::with_capacity(section.fields.len());
    let mut args = Vec::with_capacity(section.fields.len());

    for field in &section.fields {
        let symbol = match &field.symbol {
            Some(s) => s.clone(),
            None => symbols
                .allocate()
                .ok_or_else(|| Error::SymbolExhausted {
                    instruction: instruction.to_string(),
                })?
                .to_string(),
        };

        // Missing bit count is only diagnosed; missing offset aborts. The
        // asymmetry is inherited behavior, kept on purpose.
        let width = match field.width {
            Some(w) => w as usize,
            None => {
                warn!(
                    field = %field.name,
                    instruction = %instruction,
                    "bit count not present, assuming 0"
                );
                0
            }
        };

        let argtype = field
            .argtype
            .clone()
            .unwrap_or_else(|| format!("Imm{width}"));

        let offset = field.offset.ok_or_else(|| Error::MissingOffset {
            field: field.name.clone(),
            instruction: instruction.to_string(),
        })? as usize;

        let mark = symbol.chars().next().unwrap_or(FILLER);
        pattern.place(mark, offset, width);

        notes.push((symbol, field.name.clone()));
        args.push((
            offset + multiplier * SECTION_BITS,
            Param {
                ty: argtype,
                name: field.name.clone(),
            },
        ));
    }

    if pattern.len() != SECTION_BITS {
        warn!(
            section = %section.name,
            instruction = %instruction,
            pattern = %pattern.render(),
            "section definition does not total 32 bits"
        );
        pattern.pad_to_section();
    }

    Ok(AssembledSection {
        pattern: pattern.render(),
        notes,
        args,
    })
}
