//! Prompt sent to the model service.
//!
//! The text is the contract the model must satisfy: a single JSON object with
//! `complexity`, `confidence`, `staticAnalysis` and `testCode`, where
//! `testCode` is a complete Go program printing one `size,time_in_ms` line per
//! benchmarked input size. Nothing here checks that the model complied; the
//! reply decoder and the series parser are the only enforcement.

/// Iteration target per input size, in milliseconds
pub const TARGET_MILLIS: u32 = 500;

/// Upper bound on timing-loop iterations per input size
pub const MAX_ITERATIONS: u64 = 10_000_000;

/// Build the analysis prompt for `code` written in `language`.
///
/// Deterministic: the same inputs always produce the same text, and both are
/// embedded verbatim.
pub fn build_analysis_prompt(code: &str, language: &str) -> String {
    format!(
        r#"You are an expert Big O complexity analyzer. Analyze this {language} code.

CODE:
{code}

Return ONLY valid JSON (no markdown, no code blocks):
{{
  "complexity": "O(n log n)",
  "confidence": 95.0,
  "staticAnalysis": [
    "Specific detail about what this algorithm does",
    "Another specific observation",
    "A third unique detail"
  ],
  "testCode": "package main\n\nimport (\"fmt\"; \"time\")\n\nfunc algorithm() {{}}\n\nfunc main() {{\n\tfmt.Println(\"1000,0.123\")\n}}"
}}

COMPLEXITY NOTATION:
- Use · for multiplication: O(n·2ⁿ), O(n·n!), O(n²·log n)
- Common: O(1), O(log n), O(√n), O(n), O(n log n), O(n²), O(n³)
- Exponential: O(2ⁿ), O(3ⁿ), O(n·2ⁿ)
- Factorial: O(n!), O(n·n!)
- When each produced result is copied or built, multiply by the result size

STATIC ANALYSIS - describe WHAT this specific code does, not generic traits:
- Bad: "Has a loop", "Uses recursion"
- Good: "Halves the search space by comparing the middle element with the target"
- Good: "Keeps left and right pointers that converge while tracking the maximum"

TEST CODE - a COMPLETE runnable Go program (package main):

1. Implement the algorithm with a signature suited to the analyzed code.

2. Pick input sizes from the expected complexity:
   - O(1) to O(n log n): [1000, 5000, 10000, 50000, 100000]
   - O(n²): [100, 500, 1000, 2000, 3000]
   - O(n³): [20, 40, 60, 80, 100]
   - O(2ⁿ): [10, 12, 14, 16, 18, 20]
   - O(n!): [7, 8, 9, 10]

3. For EACH size, time the algorithm until about {target}ms have elapsed:
   - start with iterations = 1
   - run the algorithm `iterations` times and measure the total
   - below {target}ms: double iterations and measure again
   - at or above {target}ms: report the average time per iteration
   - never exceed {max_iterations} iterations; at the cap report the last average

4. Output format, one line per size and nothing else on stdout:
   size,time_in_ms
   Example: 1000,0.000123

5. Template:
package main

import ("fmt"; "time")

func algorithm(/* params */) /* result */ {{
    /* implementation */
}}

func main() {{
    sizes := []int{{/* sizes */}}
    targetTime := {target}.0

    for _, size := range sizes {{
        // build input data for this size

        iterations := 1
        for {{
            start := time.Now()
            for i := 0; i < iterations; i++ {{
                algorithm(/* input */)
            }}
            elapsed := float64(time.Since(start).Nanoseconds()) / 1e6

            if elapsed >= targetTime {{
                fmt.Printf("%d,%.9f\n", size, elapsed/float64(iterations))
                break
            }}

            iterations *= 2
            if iterations > {max_iterations} {{
                fmt.Printf("%d,%.9f\n", size, elapsed/float64(iterations/2))
                break
            }}
        }}
    }}
}}

Return ONLY JSON."#,
        language = language,
        code = code,
        target = TARGET_MILLIS,
        max_iterations = MAX_ITERATIONS,
    )
}
