use clap::{arg,crate_version,Command};
use std::path::{Path,PathBuf};
use huffcoder::{huffman,names,STD_OPTIONS};
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

const RCH: &str = "unreachable was reached";

fn ok_to_overwrite(path_out: &Path) -> bool {
    if let Ok(_f) = std::fs::File::open(path_out) {
        let mut ans = String::new();
        eprint!("{} exists, overwrite? (y/n) ",path_out.display());
        std::io::stdin().read_line(&mut ans).expect("could not read stdin");
        if ans.trim_end()=="y" || ans.trim_end()=="Y" {
            return true;
        }
        return false;
    }
    true
}

fn main() -> STDRESULT
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let long_help =
"Examples:
---------
Compress:      `huffcoder compress -i notes.txt` produces notes.txt.huf
Decompress:    `huffcoder decompress -i notes.txt.huf` produces notes_unc.txt";

    let mut main_cmd = Command::new("huffcoder")
        .about("Compress and expand with static Huffman coding")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(Command::new("compress")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-o --output <PATH> "output path, default appends .huf").required(false))
        .arg(arg!(--bits "print the encoded bits"))
        .about("compress a file"));

    main_cmd = main_cmd.subcommand(Command::new("decompress")
        .visible_alias("expand")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-o --output <PATH> "output path, default replaces .ext.huf with _unc.ext").required(false))
        .about("decompress a file"));

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("compress") {
        let path_in = PathBuf::from(cmd.get_one::<String>("input").expect(RCH));
        let path_out = match cmd.get_one::<String>("output") {
            Some(p) => PathBuf::from(p),
            None => names::compressed_name(&path_in)
        };
        if !ok_to_overwrite(&path_out) {
            eprintln!("abort operation");
            return Ok(());
        }
        let mut in_file = std::fs::File::open(&path_in)?;
        let mut out_file = std::fs::OpenOptions::new().write(true).truncate(true).create(true).open(&path_out)?;
        let summary = huffman::compress(&mut in_file,&mut out_file,&STD_OPTIONS)?;
        if cmd.get_flag("bits") {
            println!("{}",summary.bits);
        }
        eprintln!("compressed {} into {}",summary.in_size,summary.out_size);
    }

    if let Some(cmd) = matches.subcommand_matches("decompress") {
        let path_in = PathBuf::from(cmd.get_one::<String>("input").expect(RCH));
        let path_out = match cmd.get_one::<String>("output") {
            Some(p) => PathBuf::from(p),
            None => names::expanded_name(&path_in)?
        };
        if !ok_to_overwrite(&path_out) {
            eprintln!("abort operation");
            return Ok(());
        }
        let mut in_file = std::fs::File::open(&path_in)?;
        let mut out_file = std::fs::OpenOptions::new().write(true).truncate(true).create(true).open(&path_out)?;
        let (in_size,out_size) = huffman::decompress(&mut in_file,&mut out_file,&STD_OPTIONS)?;
        eprintln!("expanded {} into {}",in_size,out_size);
    }

    Ok(())
}
