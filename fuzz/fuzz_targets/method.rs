#![no_main]

use jvmeta::{ClassReader, ClassWriter, ConstantPool, Method};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut pool = ConstantPool::new();
    for value in ["main", "()V", "Code", "<init>", "Exceptions"] {
        let _ = pool.add_utf8(value);
    }

    let mut reader = ClassReader::new(data, &pool);
    let Ok(method) = Method::read(&mut reader, None) else {
        return;
    };

    // Normalized records re-encode to bytes that decode back to the same record
    let mut writer = ClassWriter::new(&pool);
    method.write(&mut writer).unwrap();
    let bytes = writer.into_bytes();

    let mut reader = ClassReader::new(&bytes, &pool);
    assert_eq!(Method::read(&mut reader, None).unwrap(), method);
});
