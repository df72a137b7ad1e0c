use pretty_assertions::assert_eq;

use super::*;

#[test]
fn fresh_temp() {
    let mut w = CodeWriter::new(4);
    assert_eq!(w.fresh_temp("v"), "v0");
    assert_eq!(w.fresh_temp("v"), "v1");
    w.reset_temps();
    assert_eq!(w.fresh_temp("t"), "t0");
}

#[test]
fn indent_dedent() {
    let mut w = CodeWriter::new(4);

    w.writeln("line1");
    w.indent();
    w.writeln("line2");
    w.indent();
    w.writeln("line3");
    w.dedent();
    w.writeln("line4");
    w.dedent();
    w.writeln("line5");

    assert_eq!(
        w.take_output(),
        "line1\n    line2\n        line3\n    line4\nline5\n"
    );
}

#[test]
fn blocks() {
    let mut w = CodeWriter::new(2);
    w.open_block("class A");
    w.writeln("x;");
    w.writeln("");
    w.open_block("");
    w.close_block(";");
    w.close_block("");

    assert_eq!(w.take_output(), "class A {\n  x;\n\n  {\n  };\n}\n");
    assert!(w.is_empty());
}
