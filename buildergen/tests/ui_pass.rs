//! Programs using the markers that must compile.

#[test]
fn ui_pass_tests() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/pass_*.rs");
}
