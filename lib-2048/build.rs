use std::{
    env,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use core_2048::row;

fn write_table<T: std::fmt::Display>(
    file_path: &impl AsRef<Path>,
    items: impl IntoIterator<Item = T>,
) -> io::Result<()> {
    let file = File::create(file_path)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(b"[")?;

    for item in items {
        write!(writer, "{item},")?;
    }

    writer.write_all(b"]\n")?;
    writer.flush()
}

fn write_move_table(file_path: &impl AsRef<Path>) -> io::Result<()> {
    let rows = (0..=u16::MAX).map(|packed| row::merge_row(packed).0);

    write_table(file_path, rows)
}

fn write_score_table(file_path: &impl AsRef<Path>) -> io::Result<()> {
    let scores = (0..=u16::MAX).map(|packed| row::merge_row(packed).1);

    write_table(file_path, scores)
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../core-2048/src");

    let out_dir = env::var("OUT_DIR").unwrap();
    let out_dir_path = Path::new(&out_dir);

    let move_table_path = out_dir_path.join("move_table.rs");
    write_move_table(&move_table_path).unwrap();

    let score_table_path = out_dir_path.join("score_table.rs");
    write_score_table(&score_table_path).unwrap();
}
