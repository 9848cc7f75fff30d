use hackasm::code::COMP;
use hackasm::{AssemblerOptions, assemble, assemble_program};
use proptest::prelude::*;

// Property-based tests: robustness on arbitrary input and the encoding laws

fn arb_asm_line() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<u16>().prop_map(|n| format!("@{}", n)),
        "[a-zA-Z_][a-zA-Z0-9_]*".prop_map(|s| format!("@{}", s)),
        "[a-zA-Z_][a-zA-Z0-9_]*".prop_map(|s| format!("({})", s)),
        "[ADM01=;JGTMP+!&|-]+",
        "//[^\n]*",
        "[ \t\r\n]*",
        "[\\x20-\\x7E]+",
    ]
}

fn arb_asm_program() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_asm_line(), 0..100).prop_map(|lines| lines.join("\n"))
}

fn arb_comp() -> impl Strategy<Value = &'static str> {
    let mut keys: Vec<&'static str> = COMP.keys().copied().collect();
    keys.sort_unstable();
    prop::sample::select(keys)
}

proptest! {
    /// The assembler may reject input but must never panic
    #[test]
    fn test_no_panic_on_arbitrary_input(input in arb_asm_program()) {
        let _ = assemble(&input);
    }

    /// @n encodes as 0 followed by n in 15 bits
    #[test]
    fn test_address_encoding(addr in 0u32..=32767) {
        let output = assemble(&format!("@{}", addr)).unwrap();
        prop_assert_eq!(output, format!("0{:015b}\n", addr));
    }

    #[test]
    fn test_out_of_range_addresses(addr in 32768u32..=1_000_000) {
        let source = format!("@{}", addr);
        prop_assert!(assemble(&source).is_err());
    }

    /// Every whitelisted comp encodes as a C-instruction
    #[test]
    fn test_compute_prefix(
        comp in arb_comp(),
        dest in prop::sample::select(vec!["", "M", "D", "MD", "A", "AM", "AD", "AMD"]),
    ) {
        let source = if dest.is_empty() {
            comp.to_string()
        } else {
            format!("{}={}", dest, comp)
        };
        let output = assemble(&source).unwrap();
        prop_assert!(output.starts_with("111"));
        prop_assert_eq!(output.trim_end().len(), 16);
    }

    #[test]
    fn test_comments_ignored(comment in "//.*") {
        prop_assert_eq!(assemble(&comment).unwrap(), "");
    }

    #[test]
    fn test_whitespace_handling(ws in "[ \t]*") {
        let source = format!("{}@0{}", ws, ws);
        prop_assert!(assemble(&source).is_ok());
    }

    /// A label after n instructions resolves to n, wherever it is referenced
    #[test]
    fn test_label_address(before in 0usize..40, after in 0usize..40) {
        let mut source = String::from("@TARGET\n");
        source.push_str(&"D=D+1\n".repeat(before));
        source.push_str("(TARGET)\n");
        source.push_str(&"D=D-1\n".repeat(after));
        source.push_str("@TARGET\n");

        let assembly = assemble_program(&source, AssemblerOptions::default()).unwrap();
        let expected = (before + 1) as u32;
        prop_assert_eq!(assembly.symbols.get("TARGET").unwrap(), expected);
        prop_assert_eq!(assembly.words[0].bits() as u32, expected);
        prop_assert_eq!(assembly.words.last().unwrap().bits() as u32, expected);
    }

    /// Distinct variables get sequential addresses from 16; reuse is stable
    #[test]
    fn test_variable_allocation(vars in prop::collection::btree_set("v[a-z0-9]{0,6}", 1..10)) {
        let mut source = String::new();
        for var in &vars {
            source.push_str(&format!("@{}\nM=1\n", var));
        }
        for var in &vars {
            source.push_str(&format!("@{}\n", var));
        }

        let assembly = assemble_program(&source, AssemblerOptions::default()).unwrap();
        prop_assert_eq!(assembly.words.len(), vars.len() * 3);
        for (i, var) in vars.iter().enumerate() {
            let expected = 16 + i as u32;
            prop_assert_eq!(assembly.symbols.get(var).unwrap(), expected);
            prop_assert_eq!(assembly.words[vars.len() * 2 + i].bits() as u32, expected);
        }
    }

    /// Redeclaring a label keeps its first address
    #[test]
    fn test_duplicate_labels_keep_first(label in "[A-Z][A-Z0-9_]*") {
        prop_assume!(!hackasm::symbols::PREDEFINED.contains_key(label.as_str()));
        let source = format!("({})\n@0\n({})\n@1\n@{}", label, label, label);
        let output = assemble(&source).unwrap();
        prop_assert_eq!(output.lines().last().unwrap(), "0000000000000000");
    }
}

#[cfg(test)]
mod additional_fuzz_tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(assemble("").unwrap(), "");
    }

    #[test]
    fn test_only_comments() {
        assert_eq!(assemble("// comment\n// another").unwrap(), "");
    }

    #[test]
    fn test_only_whitespace() {
        assert_eq!(assemble("   \n\t\n  ").unwrap(), "");
    }

    #[test]
    fn test_malformed_label_no_closing() {
        assert!(assemble("(LABEL").is_err());
    }

    #[test]
    fn test_malformed_label_no_opening() {
        assert!(assemble("LABEL)").is_err());
    }

    #[test]
    fn test_empty_a_instruction() {
        assert!(assemble("@").is_err());
    }

    #[test]
    fn test_invalid_c_instruction() {
        assert!(assemble("D==M").is_err());
    }

    #[test]
    fn test_long_symbol_name() {
        let long_name = "a".repeat(1000);
        assert!(assemble(&format!("@{}", long_name)).is_ok());
    }
}
