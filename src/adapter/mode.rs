//! Permission-string rendering.
//!
//! Each format keeps its own representation; these helpers only render the
//! raw header value.

const S_IFMT: u32 = 0o170000;
const S_IFSOCK: u32 = 0o140000;
const S_IFLNK: u32 = 0o120000;
const S_IFBLK: u32 = 0o060000;
const S_IFDIR: u32 = 0o040000;
const S_IFCHR: u32 = 0o020000;
const S_IFIFO: u32 = 0o010000;

const S_ISUID: u32 = 0o4000;
const S_ISGID: u32 = 0o2000;
const S_ISVTX: u32 = 0o1000;

/// Raw mode as zero-prefixed octal, e.g. `0100644`.
pub fn octal_mode(mode: u32) -> String {
    if mode == 0 {
        "0".to_string()
    } else {
        format!("0{:o}", mode)
    }
}

/// Symbolic mode such as `drwxr-xr-x` or `-rw-r--r--`.
///
/// Type and special-bit letters (`d L D p S u g c t`) come first, in that
/// order; a single `-` stands in when none apply.
pub fn symbolic_mode(mode: u32) -> String {
    let mut out = String::with_capacity(12);

    match mode & S_IFMT {
        S_IFDIR => out.push('d'),
        S_IFLNK => out.push('L'),
        S_IFBLK => out.push('D'),
        S_IFIFO => out.push('p'),
        S_IFSOCK => out.push('S'),
        S_IFCHR => out.push('D'),
        _ => {}
    }
    if mode & S_ISUID != 0 {
        out.push('u');
    }
    if mode & S_ISGID != 0 {
        out.push('g');
    }
    if mode & S_IFMT == S_IFCHR {
        out.push('c');
    }
    if mode & S_ISVTX != 0 {
        out.push('t');
    }
    if out.is_empty() {
        out.push('-');
    }

    const RWX: &[u8; 9] = b"rwxrwxrwx";
    for (i, c) in RWX.iter().enumerate() {
        if mode & (1 << (8 - i)) != 0 {
            out.push(*c as char);
        } else {
            out.push('-');
        }
    }
    out
}
