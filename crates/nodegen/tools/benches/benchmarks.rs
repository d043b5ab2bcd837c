// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.


use criterion::{Criterion, black_box, criterion_group, criterion_main};
use nodegen_compiler::{Batch, CompilerConfig, GenerationPipeline, PipelineBuilder};

const ARITHMETIC: &str = include_str!("../../compiler/tests/fixtures/arithmetic.json");
const LOGICAL: &str = include_str!("../../compiler/tests/fixtures/logical.json");

fn bench_analysis(c: &mut Criterion) {
    c.bench_function("analyze_arithmetic", |b| {
        b.iter(|| {
            let batch = Batch::from_json(black_box(ARITHMETIC)).unwrap();
            let mut pipeline = PipelineBuilder::new().check().build().unwrap();
            pipeline.analyze(batch).unwrap()
        })
    });
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, source) in [("arithmetic", ARITHMETIC), ("logical", LOGICAL)] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut pipeline = GenerationPipeline::new(CompilerConfig::default()).unwrap();
                pipeline.execute_json(black_box(source)).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_analysis, bench_generation);
criterion_main!(benches);
