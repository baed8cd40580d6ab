use crate::bitstring::assemble_section;
use crate::emit::Emitter;
use crate::error::Error;
use crate::params::ParamOrder;
use crate::rules::Instruction;
use crate::symbols::SymbolAllocator;

/// Renders the full generated artifact for an ordered list of instruction
/// entries. Any error discards everything accumulated so far; nothing is
/// written by this layer.
pub fn generate(instructions: &[Instruction]) -> Result<String, Error> {
    let mut emitter = Emitter::new();

    for instr in instructions {
        // Fresh allocator per instruction; symbols never leak across entries.
        let mut symbols = SymbolAllocator::new();
        let mut params = ParamOrder::new();
        let mut notes = Vec::new();
        let mut pattern = String::new();

        let total = instr.sections.len();
        for (secid, section) in instr.sections.iter().enumerate() {
            let assembled =
                assemble_section(&instr.display_name, section, total - 1 - secid, &mut symbols)?;
            pattern.push_str(&assembled.pattern);
            notes.extend(assembled.notes);
            for (offset, param) in assembled.args {
                params.insert(offset, param);
            }
        }

        emitter.push_instruction(
            &instr.display_name,
            &instr.handler,
            &params.into_ordered(),
            &notes,
            &pattern,
        );
    }

    Ok(emitter.finish())
}
