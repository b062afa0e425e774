//! Response Formatting Benchmarks
//!
//! Measures the markup-to-HTML formatter and quiz extraction on answers of
//! realistic size.
//!
//! Run with: `cargo bench --bench formatting`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ziyoai_server::formatter::format_response;
use ziyoai_server::quiz::extract_quiz;

/// A seven-section homework answer, repeated to reach larger sizes
fn homework_answer(repeats: usize) -> String {
    let section = "**1. CHECK RESULT:**\nThe answer is **incorrect**.\n\n\
                   **2. CORRECT ANSWER:**\n2x + 3 = 7 so x = 2, check: 2 * 2 = 4\n\n\
                   **3. FORMULA/RULE:**\n- Move constants: `ax + b = c`\n- Divide by `a`\n\n\
                   **4. STEP-BY-STEP SOLUTION:**\n1) 2x = 7 - 3\n2) 2x = 4\n3) x = 2\n\n\
                   **5. WHY IT'S LIKE THIS:**\nBoth sides stay equal <always>.\n\n\
                   **6. SIMILAR EXAMPLE:**\n3x + 1 = 10 so x = 3\n\n\
                   **7. TIP:**\n> Always substitute back.\n---\n";
    section.repeat(repeats)
}

fn quiz_answer(questions: usize) -> String {
    let question = r#"{"question":"What is 2 + 2?","options":["3","4","5","6"],"correctAnswer":1,"explanation":"Basic addition."}"#;
    let list = vec![question; questions].join(",");
    format!("Here is the quiz:\n```json\n{{\"questions\":[{}]}}\n```", list)
}

fn bench_format_response(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_response");

    for repeats in [1, 10, 50] {
        let input = homework_answer(repeats);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(repeats), &input, |b, input| {
            b.iter(|| format_response(black_box(input)))
        });
    }

    group.finish();
}

fn bench_extract_quiz(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_quiz");

    for questions in [5, 20] {
        let input = quiz_answer(questions);
        group.bench_with_input(BenchmarkId::from_parameter(questions), &input, |b, input| {
            b.iter(|| extract_quiz(black_box(input)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_format_response, bench_extract_quiz);
criterion_main!(benches);
