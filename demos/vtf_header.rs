//! VTF Header Demo
//!
//! Membangun header Valve Texture Format (v7.4) dengan satu resource KVD,
//! menulisnya ke file lewat mmap, lalu membaca ulang dan decode.
//!
//! Usage:
//!   cargo run --example vtf_header

use bytestruct::sink::MappedFile;
use bytestruct::{from_fn, Encode, Field, IntWidth, Interpretation, Struct, Value};

const RESOURCE_COUNT: u64 = 1;

fn build_vtf() -> bytestruct::Result<Struct> {
    let mut vtf = Struct::with_members(
        "VTF_File",
        [
            Field::ascii("signature", "VTF\0"),
            Field::uint32_array("version", [7, 4]),
            Field::uint32("headerSize", 80 + RESOURCE_COUNT * 8),
            Field::uint16("width", 0),
            Field::uint16("height", 0),
            Field::uint32("flags", 0),
            Field::uint16("frames", 1),
            Field::uint16("firstFrame", 0),
            Field::zeroed("padding0", IntWidth::U8, 4),
            Field::float32_array("reflectivity", [0.0, 0.0, 0.0]),
            Field::zeroed("padding1", IntWidth::U8, 4),
            Field::float32("bumpmapScale", 1.0),
            Field::uint32("highResImageFormat", 0),
            Field::uint8("mipmapCount", 0),
            Field::uint32("lowResImageFormat", 0),
            Field::uint8("lowResImageWidth", 0),
            Field::uint8("lowResImageHeight", 0),
            Field::uint16("depth", 1),
            Field::zeroed("padding2", IntWidth::U8, 3),
            Field::uint32("numResources", RESOURCE_COUNT),
            Field::zeroed("padding3", IntWidth::U8, 8),
        ],
    )?;

    vtf.add_member(Struct::with_members(
        "resource_KVD",
        [
            Field::ascii("tag", "KVD"),
            Field::uint8("flags", 0),
            Field::uint32("offset", 0),
        ],
    )?)?;

    // Resource data dimulai tepat setelah header
    let offset = vtf.size() as u64;
    if let Some(resource) = vtf.member_mut("resource_KVD").and_then(Field::as_struct_mut) {
        resource.set("offset", Value::Uint(offset))?;
    }

    let content = "Info\n{\n    \"Creator\" \"Potato\"\n    \"Description\" \"This is a test for Structs.\"\n}";
    vtf.add_member(Field::uint32("KVD_length", content.len() as u64))?;
    vtf.add_member(Field::ascii("KVD_data", content))?;

    Ok(vtf)
}

fn main() -> bytestruct::Result<()> {
    println!("🧱 bytestruct - VTF header demo");
    println!("==============================\n");

    let vtf = build_vtf()?;

    println!("📐 Layout ({} bytes)", vtf.size());
    println!("-------------------");
    for member in vtf.members() {
        let offset = vtf.offset_of(member.name()).unwrap_or_default();
        println!("  {:>4}  {:<20} {:>3} bytes", offset, member.name(), member.size());
    }

    let path = std::env::temp_dir().join("bytestruct_demo.vtf");
    let written = vtf.persist(&path)?;
    println!("\n💾 Wrote {} bytes to {}", written, path.display());

    // Decode ulang: KVD_data panjangnya ditentukan oleh KVD_length
    let mapped = MappedFile::open(&path)?;
    let mut reloaded = build_vtf()?;
    reloaded.set("KVD_data", Value::Text(String::new()))?;

    let mut interpreter = from_fn(|buf: &[u8], offset: usize, member: &mut Field, prev: Option<&Field>| {
        let is_data = member.name() == "KVD_data";
        match prev.map(Field::value) {
            Some(Value::Uint(len)) if is_data => {
                let len = (len as usize).min(buf.len() - offset);
                let text: String = buf[offset..offset + len].iter().map(|&b| b as char).collect();
                match member.set_value(Value::Text(text)) {
                    Ok(()) => Interpretation::Consumed(len),
                    Err(_) => Interpretation::UseDefault,
                }
            }
            _ => Interpretation::UseDefault,
        }
    });

    let consumed = reloaded.set_bytes(mapped.as_bytes(), &mut interpreter)?;
    println!("🔁 Decoded {} bytes, identical: {}", consumed, reloaded == vtf);

    std::fs::remove_file(&path).ok();
    Ok(())
}
