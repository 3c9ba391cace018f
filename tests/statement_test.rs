mod common;
use common::*;

#[test]
fn test_mov_keeps_strings_as_strings() {
    assert_eq!(
        run("mov rg0 \"5\"\nmov rg1 5\ncmp rg0 rg1 rg2\nprintln rg2\nprintregval rg0\n"),
        "false\n'5'\n"
    );
}

#[test]
fn test_mov_between_registers() {
    assert_eq!(run("mov rg0 true\nmov rg1 rg0\nprintln rg1\n"), "true\n");
}

#[test]
fn test_mov_checks_destination_first() {
    assert_eq!(
        run("mov nope rg5\n"),
        "Line 1: Register nope does not exist, valid registers are \
         rg0,rg1,rg2,rg3,rg4,rg5,rg6,rg7,rg8,rg9\n"
    );
}

#[test]
fn test_null_source_is_fatal() {
    assert_eq!(
        run("mov rg0 rg1\nprintln \"unreachable\"\n"),
        "Line 1: Tried using value of register rg1 which is null. \
         Registers must not be null when used as source.\n"
    );
}

#[test]
fn test_unquoted_word_is_a_register() {
    assert_eq!(
        run("println hello\n"),
        "Line 1: Invalid source register hello, did you mean to put a string in quotes?\n"
    );
}

#[test]
fn test_newreg_and_delreg() {
    assert_eq!(
        run("newreg total\nmov total 3\nprintln total\ndelreg total\nprintln total\n"),
        "3\nLine 5: Invalid source register total, did you mean to put a string in quotes?\n"
    );
}

#[test]
fn test_newreg_rejects_numbers() {
    let out = run("newreg 12\n");
    assert!(out.starts_with("Line 1: "), "{}", out);
}

#[test]
fn test_printreg() {
    assert_eq!(
        run("newreg x\nmov x \"hi\"\nmov rg0 1\nprintreg\n"),
        "{\n  rg0: 1,\n  rg1: null,\n  rg2: null,\n  rg3: null,\n  rg4: null,\n  rg5: null,\n  \
         rg6: null,\n  rg7: null,\n  rg8: null,\n  rg9: null,\n  x: 'hi'\n}\n"
    );
}

#[test]
fn test_print_takes_the_rest_of_the_line() {
    assert_eq!(run("print \"a   b\"\nprint \" \"\nprintln 7\n"), "a   b 7\n");
}

#[test]
fn test_quoted_strings_keep_their_spacing() {
    assert_eq!(
        run("mov rg0 \"a   b\"\nprintln rg0\nmov rg1 \"\tx  \"\nprintregval rg1\n"),
        "a   b\n'\tx  '\n"
    );
}

#[test]
fn test_rev() {
    assert_eq!(
        run("mov rg0 \"abc\"\nrev rg0\nprintln rg0\nmov rg1 0\nrev rg1\nprintln rg1\n\
             mov rg2 false\nrev rg2\nrev rg2\nprintln rg2\n"),
        "cba\n1\nfalse\n"
    );
}

#[test]
fn test_unknown_instruction() {
    assert_eq!(
        run("println 1\nfrobnicate rg0\n"),
        "1\nLine 2: Unknown instruction/command frobnicate\n"
    );
}

#[test]
fn test_argument_count_checked_before_effects() {
    assert_eq!(run("mov rg0\n"), "Line 1: Expected 2 arguments, got 1\n");
    assert_eq!(run("add 1 2\n"), "Line 1: Expected 3 arguments, got 2\n");
    assert_eq!(run("println\n"), "Line 1: Expected at least 1 arguments, got 0\n");
}

#[test]
fn test_comments_keep_file_line_numbers() {
    assert_eq!(
        run("; header\n\n# more\nprintln 1 ; inline\njmp missing\n"),
        "1\nLine 5: There is no label named missing. Add the label first.\n"
    );
}

#[test]
fn test_exit_status() {
    assert_eq!(run("exit 3\nprintln 1\n"), "<exit 3>\n");
    assert_eq!(run("quit\n"), "<exit 0>\n");
    assert_eq!(run("exit 2.9\n"), "<exit 2>\n");
}

#[test]
fn test_exit_with_other_values() {
    assert_eq!(
        run("exit \"done\"\n"),
        "Program exited. Result:\n'done'\n<exit 0>\n"
    );
    assert_eq!(run("exit 300\n"), "Program exited. Result:\n300\n<exit 0>\n");
}

#[test]
fn test_sleep() {
    assert_eq!(run("sleep 20\nsleep -5\nprintln 1\n"), "<sleep 20>\n<sleep 0>\n1\n");
    assert_eq!(
        run("sleep \"soon\"\n"),
        "Line 1: Can't sleep for non-numeric duration soon\n"
    );
}
