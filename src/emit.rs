use std::fmt::Write as _;

use crate::params::Param;

/// Fixed destination of the generated artifact.
pub const OUTPUT_FILE: &str = "parse_gxp_usse.cpp";

const DECODE_PROLOGUE: &str = concat!(
    "template <typename V>\n",
    "boost::optional<const USSEMatcher<V> &> DecodeUSSE(uint64_t instruction) {\n",
    "   static const std::vector<USSEMatcher<V>> table {\n",
    "        // clang-format off\n",
    "#define INST(fn, name, bitstring) shader::decoder::detail::detail<USSEMatcher<V>>::GetMatcher(fn, name, bitstring)\n",
);

const DECODE_EPILOGUE: &str = concat!(
    "        // clang-format on\n",
    "   };\n",
    "#undef INST\n",
    "   const auto matches_instruction = [instruction](const auto &matcher) { return matcher.Matches(instruction); };\n",
    "   auto iter = std::find_if(table.begin(), table.end(), matches_instruction);\n",
    "   return iter != table.end() ? boost::optional<const USSEMatcher<V> &>(*iter) : boost::none;\n",
    "}",
);

/// Accumulates the two generated fragments per instruction (handler stub and
/// annotated table row) and renders the final artifact once.
#[derive(Debug)]
pub struct Emitter {
    stubs: String,
    table: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self {
            stubs: String::new(),
            table: DECODE_PROLOGUE.to_string(),
        }
    }

    pub fn push_instruction(
        &mut self,
        display_name: &str,
        handler: &str,
        params: &[Param],
        notes: &[(String, String)],
        pattern: &str,
    ) {
        let list: Vec<String> = params
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .collect();
        let _ = write!(
            self.stubs,
            "bool {handler}({}) {{\n\n}}\n\n",
            list.join(", ")
        );

        self.table.push_str("        /*\n");
        for (symbol, field) in notes {
            let _ = writeln!(self.table, "           * {symbol} = {field}");
        }
        self.table.push_str("        */");
        let _ = write!(
            self.table,
            "\n        INST(&v::{handler}, \"{display_name} ()\",     \"{pattern}\"),\n"
        );
    }

    pub fn finish(self) -> String {
        format!("{}\n{}{}\n", self.stubs, self.table, DECODE_EPILOGUE)
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}
