//! Prints the CP437 glyph table, the low-range overrides first.
//!
//! Run with
//!
//! ```bash
//! cargo run -p cp437modem --example glyph_map
//! ```
#![allow(missing_docs)]

fn main() {
    let table = cp437modem::CodepageTable::shared();

    println!("Graphical control glyphs:");
    for info in table.graphical_glyphs() {
        println!("  0x{:02X}  {}  {}", info.byte, info.glyph, info.name);
    }

    println!();
    println!("     {}", (0..16).map(|n| format!("{n:X} ")).collect::<String>());
    for row in 0..16u8 {
        let cells: String = (0..16u8)
            .map(|col| {
                let ch = table.decode_byte(row * 16 + col);
                // Keep the grid aligned where the table leaves control bytes.
                let shown = if ch.is_control() { '·' } else { ch };
                format!("{shown} ")
            })
            .collect();
        println!("  {row:X}x {cells}");
    }

    let sample = "Hello ☺ ╔═╗ 日本";
    println!();
    println!("encode({sample:?}) = {:02X?}", table.encode(sample));
}
