// Parser robustness tests
//
// Table of inputs that must parse, or must fail with a given message,
// run through the lexer and parser together.

use scripto::error::ScriptoError;

/// Test result for a single test case
#[derive(Debug)]
pub enum TestResult {
    Pass,
    Fail(String),
    Crash(String),
}

/// Individual test case
#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub input: String,
    pub should_succeed: bool,
    pub expected_error_contains: Option<String>,
}

/// Test suite containing multiple test cases
#[derive(Debug)]
pub struct TestSuite {
    pub name: String,
    pub tests: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tests: Vec::new(),
        }
    }

    pub fn add_test(&mut self, test: TestCase) {
        self.tests.push(test);
    }

    /// Run all tests in this suite
    pub fn run(&self) -> TestSuiteResults {
        let mut results = TestSuiteResults::new(&self.name);

        println!("Running test suite: {}", self.name);
        println!("{}", "=".repeat(50));

        for test in &self.tests {
            let result = run_single_test(test);
            results.add_result(&test.name, result);
        }

        results.print_summary();
        results
    }
}

/// Results for a test suite run
#[derive(Debug)]
pub struct TestSuiteResults {
    pub suite_name: String,
    pub results: Vec<(String, TestResult)>,
    pub passed: usize,
    pub failed: usize,
    pub crashed: usize,
}

impl TestSuiteResults {
    pub fn new(suite_name: &str) -> Self {
        Self {
            suite_name: suite_name.to_string(),
            results: Vec::new(),
            passed: 0,
            failed: 0,
            crashed: 0,
        }
    }

    pub fn add_result(&mut self, test_name: &str, result: TestResult) {
        match &result {
            TestResult::Pass => {
                self.passed += 1;
                println!("  ok   {}", test_name);
            }
            TestResult::Fail(msg) => {
                self.failed += 1;
                println!("  FAIL {}: {}", test_name, msg);
            }
            TestResult::Crash(msg) => {
                self.crashed += 1;
                println!("  CRASH {}: {}", test_name, msg);
            }
        }
        self.results.push((test_name.to_string(), result));
    }

    pub fn print_summary(&self) {
        println!();
        println!("Test Suite: {} - Summary", self.suite_name);
        println!("{}", "-".repeat(30));
        println!("Passed:  {}", self.passed);
        println!("Failed:  {}", self.failed);
        println!("Crashed: {}", self.crashed);
        println!("Total:   {}", self.results.len());

        if self.crashed > 0 {
            println!("\nWARNING: {} tests caused crashes.", self.crashed);
        }

        if self.failed > 0 {
            println!("\n{} tests had unexpected results.", self.failed);
        }

        if self.crashed == 0 && self.failed == 0 {
            println!("\nAll tests passed.");
        }
        println!();
    }

    pub fn is_all_passed(&self) -> bool {
        self.crashed == 0 && self.failed == 0
    }
}

/// Run a single test case
fn run_single_test(test: &TestCase) -> TestResult {
    // Catch any panics to detect crashes
    let result = std::panic::catch_unwind(|| {
        parse_input(&test.input)
    });

    match result {
        Ok(parse_result) => {
            match (parse_result, test.should_succeed) {
                (Ok(_), true) => TestResult::Pass,
                (Ok(_), false) => TestResult::Fail("Expected parsing to fail, but it succeeded".to_string()),
                (Err(error), false) => {
                    // Check if error contains expected text
                    if let Some(expected) = &test.expected_error_contains {
                        if error.message().contains(expected) {
                            TestResult::Pass
                        } else {
                            TestResult::Fail(format!(
                                "Error message '{}' doesn't contain expected text '{}'",
                                error.message(), expected
                            ))
                        }
                    } else {
                        TestResult::Pass // Any error is acceptable
                    }
                }
                (Err(error), true) => TestResult::Fail(format!("Expected parsing to succeed, but got error: {}", error.message())),
            }
        }
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else {
                "Unknown panic".to_string()
            };
            TestResult::Crash(panic_msg)
        }
    }
}

/// Parse input and return result
fn parse_input(input: &str) -> Result<scripto::ast::Program, ScriptoError> {
    scripto::parse(input)
}

/// Test case builder for convenience
impl TestCase {
    pub fn should_succeed(name: &str, input: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: true,
            expected_error_contains: None,
        }
    }

    pub fn should_fail(name: &str, input: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: false,
            expected_error_contains: None,
        }
    }

    pub fn should_fail_with_message(name: &str, input: &str, expected_msg: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: false,
            expected_error_contains: Some(expected_msg.to_string()),
        }
    }
}

// ============================================================================
// Test Suite Creation Functions
// ============================================================================

fn create_grouping_tests() -> TestSuite {
    let mut suite = TestSuite::new("Grouping");

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_opening_paren",
        "(1 + 2",
        "expected ')' after parenthesised expression, found 'EOF'",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_opening_paren_nested",
        "(1 + (2 * 3)",
        "expected ')' after parenthesised expression",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_closing_paren",
        "1 + 2)",
        "expected expression, found ')'",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "empty_parentheses",
        "()",
        "expected expression, found ')'",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "stray_closing_brace",
        "x = 1 }",
        "expected expression, found '}'",
    ));

    let deep_parens = "(".repeat(100) + "1" + &")".repeat(100);
    suite.add_test(TestCase::should_succeed("deeply_nested_parens", &deep_parens));

    suite
}

fn create_edge_case_tests() -> TestSuite {
    let mut suite = TestSuite::new("Edge Cases");

    suite.add_test(TestCase::should_succeed("empty_input", ""));
    suite.add_test(TestCase::should_succeed("only_whitespace", "   \n\t  "));
    suite.add_test(TestCase::should_succeed("lone_semicolon_after_expression", "1;"));

    suite.add_test(TestCase::should_fail_with_message(
        "unexpected_eof_after_operator",
        "1 +",
        "expected expression, found 'EOF'",
    ));
    suite.add_test(TestCase::should_fail("unexpected_eof_in_group", "1 + ("));
    suite.add_test(TestCase::should_fail_with_message(
        "lone_semicolon",
        ";",
        "expected expression, found ';'",
    ));

    // No fractional literals: `3.5` is `3`, `.`, `5`
    suite.add_test(TestCase::should_fail_with_message(
        "fractional_literal",
        "3.5",
        "expected identifier after '.', found '5'",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "reserved_func_keyword",
        "func",
        "expected expression, found 'func'",
    ));

    suite
}

fn create_operator_tests() -> TestSuite {
    let mut suite = TestSuite::new("Operator Tests");

    suite.add_test(TestCase::should_succeed("all_operators", "1 + 2 - 3 * 4 / 5 % 6 ^ 7"));
    suite.add_test(TestCase::should_succeed("chained_power", "2 ^ 3 ^ 2"));

    suite.add_test(TestCase::should_fail("missing_left_operand", "+ 1"));
    suite.add_test(TestCase::should_fail("missing_right_operand", "1 *"));
    suite.add_test(TestCase::should_fail("double_plus", "1 ++ 2"));
    // No unary minus
    suite.add_test(TestCase::should_fail("unary_minus", "-1"));

    suite
}

fn create_declaration_tests() -> TestSuite {
    let mut suite = TestSuite::new("Declaration Tests");

    suite.add_test(TestCase::should_succeed("let_with_value", "let x = 5;"));
    suite.add_test(TestCase::should_succeed("let_without_value", "let x;"));
    suite.add_test(TestCase::should_succeed("const_with_value", "const c = 10;"));
    suite.add_test(TestCase::should_succeed("let_object", "let o = { a := 1, b };"));

    suite.add_test(TestCase::should_fail_with_message(
        "const_without_value",
        "const c;",
        "constant 'c' must be initialized",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "const_without_value_or_semicolon",
        "const c",
        "constant 'c' must be initialized",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "let_missing_semicolon",
        "let x = 5",
        "expected ';' after variable declaration, found 'EOF'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "let_missing_name",
        "let = 5;",
        "expected identifier after 'let', found '='",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "keyword_as_name",
        "let const = 5;",
        "expected identifier after 'let', found 'const'",
    ));

    suite
}

fn create_object_literal_tests() -> TestSuite {
    let mut suite = TestSuite::new("Object Literal Tests");

    suite.add_test(TestCase::should_succeed("empty_object", "{}"));
    suite.add_test(TestCase::should_succeed("shorthand", "{a, b}"));
    suite.add_test(TestCase::should_succeed("explicit", "{a := 1, b := a + 2}"));
    suite.add_test(TestCase::should_succeed("trailing_comma", "{a, b,}"));
    suite.add_test(TestCase::should_succeed("nested", "{a := {b := 1}}"));
    suite.add_test(TestCase::should_succeed("assigned", "x = {a}"));

    suite.add_test(TestCase::should_fail_with_message(
        "unclosed_object",
        "{ a := 1",
        "expected '}' to close object literal, found 'EOF'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "numeric_key",
        "{ 1 }",
        "expected identifier as object key, found '1'",
    ));
    // Braces only open an object at assignment level
    suite.add_test(TestCase::should_fail_with_message(
        "object_inside_arithmetic",
        "1 + {a}",
        "expected expression, found '{'",
    ));

    suite
}

fn create_call_and_member_tests() -> TestSuite {
    let mut suite = TestSuite::new("Call And Member Tests");

    suite.add_test(TestCase::should_succeed("simple_call", "foo()"));
    suite.add_test(TestCase::should_succeed("call_with_args", "foo(1, 2, 3)"));
    suite.add_test(TestCase::should_succeed("chained_calls", "f()()"));
    suite.add_test(TestCase::should_succeed("member_call", "a.b()"));
    suite.add_test(TestCase::should_succeed("computed_member", "a[b + 1]"));
    suite.add_test(TestCase::should_succeed("member_chain", "a.b[c].d"));

    suite.add_test(TestCase::should_fail_with_message(
        "missing_closing_paren",
        "foo(1, 2",
        "expected ')' after arguments, found 'EOF'",
    ));
    suite.add_test(TestCase::should_fail("trailing_comma", "foo(1, 2,)"));
    suite.add_test(TestCase::should_fail_with_message(
        "dot_without_name",
        "a.",
        "expected identifier after '.', found 'EOF'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "unclosed_computed_member",
        "a[1",
        "expected ']' after computed property, found 'EOF'",
    ));

    suite
}

fn create_assignment_tests() -> TestSuite {
    let mut suite = TestSuite::new("Assignment Tests");

    suite.add_test(TestCase::should_succeed("simple_assignment", "x = 1"));
    suite.add_test(TestCase::should_succeed("chained_assignment", "x = y = 2"));
    // Targets are checked when evaluated, not when parsed
    suite.add_test(TestCase::should_succeed("literal_target", "5 = 3"));

    suite.add_test(TestCase::should_fail("missing_value", "x ="));

    suite
}

fn create_lexical_tests() -> TestSuite {
    let mut suite = TestSuite::new("Lexical Tests");

    suite.add_test(TestCase::should_fail_with_message(
        "unknown_character",
        "let x = 1 $ 2;",
        "character not recognized: '$'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "lone_colon",
        "{a : 1}",
        "character not recognized: ':'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "underscore",
        "my_var",
        "character not recognized: '_'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "string_quote",
        "\"hello\"",
        "character not recognized: '\"'",
    ));

    suite
}

// ============================================================================
// Main Test Function
// ============================================================================

#[test]
fn comprehensive_parser_tests() {
    let suites = vec![
        create_grouping_tests(),
        create_edge_case_tests(),
        create_operator_tests(),
        create_declaration_tests(),
        create_object_literal_tests(),
        create_call_and_member_tests(),
        create_assignment_tests(),
        create_lexical_tests(),
    ];

    let mut all_passed = true;
    for suite in suites {
        let results = suite.run();
        if !results.is_all_passed() {
            all_passed = false;
        }
    }

    assert!(all_passed, "some parser cases failed; see output above");
}
