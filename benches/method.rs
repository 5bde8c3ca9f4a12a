//! Benchmarks for method record encoding and decoding.
//!
//! Covers the hot paths of a class-file traversal:
//! - Reading a record with and without attributes
//! - Resolving records into a growing constant pool
//! - Writing resolved records
//! - Validating records

extern crate jvmeta;

use criterion::{criterion_group, criterion_main, Criterion};
use jvmeta::{
    validate, Attribute, ClassReader, ClassWriter, ConstantPool, Method, MethodAccessFlags,
    MethodBuilder, ValidationConfig,
};
use std::hint::black_box;

fn sample_pool() -> ConstantPool {
    let mut pool = ConstantPool::new();
    for value in ["main", "([Ljava/lang/String;)V", "Code", "Exceptions"] {
        pool.add_utf8(value).unwrap();
    }
    pool
}

/// Benchmark reading `public static void main(String[])` without attributes.
fn bench_read_bare(c: &mut Criterion) {
    let pool = sample_pool();
    let data = [0x00, 0x09, 0x00, 0x01, 0x00, 0x02, 0x00, 0x00];

    c.bench_function("method_read_bare", |b| {
        b.iter(|| {
            let mut reader = ClassReader::new(black_box(&data), &pool);
            black_box(Method::read(&mut reader, None).unwrap())
        });
    });
}

/// Benchmark reading a record carrying a Code and an Exceptions attribute.
fn bench_read_attributes(c: &mut Criterion) {
    let pool = sample_pool();

    #[rustfmt::skip]
    let data = [
        0x00, 0x09, 0x00, 0x01, 0x00, 0x02, 0x00, 0x02,
        0x00, 0x03, 0x00, 0x00, 0x00, 0x05, 0x2A, 0xB7, 0x00, 0x01, 0xB1,
        0x00, 0x04, 0x00, 0x00, 0x00, 0x04, 0x00, 0x01, 0x00, 0x07,
    ];

    c.bench_function("method_read_attributes", |b| {
        b.iter(|| {
            let mut reader = ClassReader::new(black_box(&data), &pool);
            black_box(Method::read(&mut reader, None).unwrap())
        });
    });
}

/// Benchmark interning 100 distinct records into a fresh pool.
fn bench_resolve(c: &mut Criterion) {
    let methods: Vec<Method> = (0..100)
        .map(|i| {
            MethodBuilder::new(format!("method{i}"), "(IJ)Ljava/lang/Object;")
                .attribute(Attribute::new("Code", vec![0xB1]))
                .build()
        })
        .collect();

    c.bench_function("method_resolve_100", |b| {
        b.iter(|| {
            let mut pool = ConstantPool::new();
            for method in &methods {
                method.resolve(&mut pool).unwrap();
            }
            black_box(pool)
        });
    });
}

/// Benchmark writing a resolved record.
fn bench_write(c: &mut Criterion) {
    let method = MethodBuilder::new("main", "([Ljava/lang/String;)V")
        .with(MethodAccessFlags::STATIC)
        .attribute(Attribute::new("Code", vec![0x2A, 0xB7, 0x00, 0x01, 0xB1]))
        .build();
    let mut pool = ConstantPool::new();
    method.resolve(&mut pool).unwrap();

    c.bench_function("method_write", |b| {
        b.iter(|| {
            let mut writer = ClassWriter::new(&pool);
            black_box(&method).write(&mut writer).unwrap();
            black_box(writer.into_bytes())
        });
    });
}

/// Benchmark the full rule set against a legal record.
fn bench_validate(c: &mut Criterion) {
    let method = MethodBuilder::new("compute", "(I[JLjava/util/Map;)[Ljava/lang/String;")
        .with(MethodAccessFlags::FINAL | MethodAccessFlags::VARARGS)
        .attribute(Attribute::new("Code", vec![0xB1]))
        .build();
    let config = ValidationConfig::strict();

    c.bench_function("method_validate", |b| {
        b.iter(|| black_box(validate(black_box(&method), &config)));
    });
}

criterion_group!(
    benches,
    bench_read_bare,
    bench_read_attributes,
    bench_resolve,
    bench_write,
    bench_validate
);
criterion_main!(benches);
