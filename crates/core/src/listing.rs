// Directory listing in `ls -al` form
//
// Every entry is inspected independently, so one unreadable entry turns into a
// single `[ERROR]` line instead of failing the whole listing.

use chrono::{DateTime, Local};
use std::ffi::{CStr, OsString};
use std::fs::{self, Metadata};
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

// `mode_t` is narrower than u32 on some platforms
const S_IFMT: u32 = libc::S_IFMT as u32;
const S_IFSOCK: u32 = libc::S_IFSOCK as u32;
const S_IFLNK: u32 = libc::S_IFLNK as u32;
const S_IFREG: u32 = libc::S_IFREG as u32;
const S_IFBLK: u32 = libc::S_IFBLK as u32;
const S_IFDIR: u32 = libc::S_IFDIR as u32;
const S_IFCHR: u32 = libc::S_IFCHR as u32;
const S_IFIFO: u32 = libc::S_IFIFO as u32;

const S_ISUID: u32 = libc::S_ISUID as u32;
const S_ISGID: u32 = libc::S_ISGID as u32;
const S_ISVTX: u32 = libc::S_ISVTX as u32;

/// Upper bound for the passwd/group lookup buffer
const MAX_LOOKUP_BUFFER: usize = 1 << 20;

/// Metadata of a single entry, captured without following symlinks
#[derive(Debug, Clone)]
pub struct EntryDetails {
    pub mode: u32,
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    pub modified: DateTime<Local>,
}

impl EntryDetails {
    pub fn from_metadata(meta: &Metadata) -> io::Result<Self> {
        Ok(Self {
            mode: meta.mode(),
            nlink: meta.nlink(),
            uid: meta.uid(),
            gid: meta.gid(),
            size: meta.size(),
            modified: DateTime::<Local>::from(meta.modified()?),
        })
    }

    /// Stat a path without following a trailing symlink
    pub fn inspect(path: &Path) -> io::Result<Self> {
        let meta = fs::symlink_metadata(path)?;
        Self::from_metadata(&meta)
    }

    /// Render one listing line for `name`
    pub fn render(&self, name: &str) -> String {
        let owner = user_name(self.uid).unwrap_or_else(|| self.uid.to_string());
        let group = group_name(self.gid).unwrap_or_else(|| self.gid.to_string());
        format!(
            "{} {} {} {} {:>8} {} {}",
            mode_string(self.mode),
            self.nlink,
            owner,
            group,
            self.size,
            self.modified.format("%Y-%m-%d %H:%M"),
            name
        )
    }
}

/// List `path` as `ls -al` lines: `.` and `..` first, then directory order.
///
/// Never fails. If the directory itself cannot be read the result is a single
/// `[ERROR]` line.
pub fn list_directory(path: impl AsRef<Path>) -> Vec<String> {
    let dir = path.as_ref();
    match entry_names(dir) {
        Ok(names) => render_entries(dir, &names, EntryDetails::inspect),
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "Failed to read directory");
            vec![format!("[ERROR] {}", e)]
        }
    }
}

fn entry_names(dir: &Path) -> io::Result<Vec<OsString>> {
    let mut names = vec![OsString::from("."), OsString::from("..")];
    for entry in fs::read_dir(dir)? {
        names.push(entry?.file_name());
    }
    Ok(names)
}

/// Render each entry with `inspect`, keeping failures inline and in order.
pub fn render_entries<F>(dir: &Path, names: &[OsString], inspect: F) -> Vec<String>
where
    F: Fn(&Path) -> io::Result<EntryDetails>,
{
    names
        .iter()
        .map(|name| {
            let shown = name.to_string_lossy();
            match inspect(&dir.join(name)) {
                Ok(details) => details.render(&shown),
                Err(e) => {
                    tracing::debug!(entry = %shown, error = %e, "Failed to inspect entry");
                    format!("[ERROR] {}: {}", shown, e)
                }
            }
        })
        .collect()
}

/// Permission string in `ls` form, e.g. `drwxr-xr-x`
pub fn mode_string(mode: u32) -> String {
    let kind = match mode & S_IFMT {
        S_IFDIR => 'd',
        S_IFLNK => 'l',
        S_IFREG => '-',
        S_IFCHR => 'c',
        S_IFBLK => 'b',
        S_IFIFO => 'p',
        S_IFSOCK => 's',
        _ => '?',
    };

    let mut out = String::with_capacity(10);
    out.push(kind);

    for (shift, special, set, unset) in [
        (6, S_ISUID, 's', 'S'),
        (3, S_ISGID, 's', 'S'),
        (0, S_ISVTX, 't', 'T'),
    ] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(match (mode & special != 0, bits & 0o1 != 0) {
            (true, true) => set,
            (true, false) => unset,
            (false, true) => 'x',
            (false, false) => '-',
        });
    }

    out
}

/// Resolve a user id to its login name
pub fn user_name(uid: u32) -> Option<String> {
    let mut buf: Vec<libc::c_char> = vec![0; 1024];
    loop {
        // SAFETY: all pointers reference live locals; `buf.len()` bounds the scratch buffer.
        let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::passwd = std::ptr::null_mut();
        let rc = unsafe {
            libc::getpwuid_r(uid, &mut pwd, buf.as_mut_ptr(), buf.len(), &mut result)
        };
        if rc == libc::ERANGE && buf.len() < MAX_LOOKUP_BUFFER {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if rc != 0 || result.is_null() || pwd.pw_name.is_null() {
            return None;
        }
        // SAFETY: on success pw_name points into `buf`, which is still alive.
        let name = unsafe { CStr::from_ptr(pwd.pw_name) };
        return Some(name.to_string_lossy().into_owned());
    }
}

/// Resolve a group id to its name
pub fn group_name(gid: u32) -> Option<String> {
    let mut buf: Vec<libc::c_char> = vec![0; 1024];
    loop {
        // SAFETY: see `user_name`.
        let mut grp: libc::group = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::group = std::ptr::null_mut();
        let rc = unsafe {
            libc::getgrgid_r(gid, &mut grp, buf.as_mut_ptr(), buf.len(), &mut result)
        };
        if rc == libc::ERANGE && buf.len() < MAX_LOOKUP_BUFFER {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if rc != 0 || result.is_null() || grp.gr_name.is_null() {
            return None;
        }
        // SAFETY: on success gr_name points into `buf`.
        let name = unsafe { CStr::from_ptr(grp.gr_name) };
        return Some(name.to_string_lossy().into_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_mode_string() {
        assert_eq!(mode_string(0o040_755), "drwxr-xr-x");
        assert_eq!(mode_string(0o100_644), "-rw-r--r--");
        assert_eq!(mode_string(0o120_777), "lrwxrwxrwx");
        assert_eq!(mode_string(0o104_755), "-rwsr-xr-x");
        assert_eq!(mode_string(0o102_644), "-rw-r-Sr--");
        assert_eq!(mode_string(0o041_777), "drwxrwxrwt");
        assert_eq!(mode_string(0o041_776), "drwxrwxrwT");
        assert_eq!(mode_string(0o010_600), "prw-------");
    }

    #[test]
    fn test_list_directory() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("hello.txt"), "hello").unwrap();
        std::fs::create_dir(temp_dir.path().join("sub")).unwrap();

        let lines = list_directory(temp_dir.path());

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with('d'));
        assert!(lines[0].ends_with(" ."));
        assert!(lines[1].ends_with(" .."));

        let file_line = lines.iter().find(|l| l.ends_with(" hello.txt")).unwrap();
        assert!(file_line.starts_with("-rw"));
        assert!(file_line.contains("        5 "));

        let dir_line = lines.iter().find(|l| l.ends_with(" sub")).unwrap();
        assert!(dir_line.starts_with('d'));
    }

    #[test]
    fn test_list_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let lines = list_directory(temp_dir.path().join("does-not-exist"));

        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[ERROR] "));
    }

    #[test]
    fn test_broken_symlink_is_listed() {
        let temp_dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink(
            temp_dir.path().join("missing-target"),
            temp_dir.path().join("dangling"),
        )
        .unwrap();

        let lines = list_directory(temp_dir.path());
        let link_line = lines.iter().find(|l| l.ends_with(" dangling")).unwrap();
        assert!(link_line.starts_with('l'));
    }

    #[test]
    fn test_failing_entry_is_isolated() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["a", "b", "c"] {
            std::fs::write(temp_dir.path().join(name), name).unwrap();
        }
        let names: Vec<OsString> = ["a", "b", "c"].iter().map(OsString::from).collect();

        let lines = render_entries(temp_dir.path(), &names, |path| {
            if path.ends_with("b") {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            } else {
                EntryDetails::inspect(path)
            }
        });

        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(" a"));
        assert_eq!(lines[1], "[ERROR] b: denied");
        assert!(lines[2].ends_with(" c"));
    }

    #[test]
    fn test_failing_entry_with_non_utf8_name() {
        use std::os::unix::ffi::OsStringExt;

        let temp_dir = TempDir::new().unwrap();
        let names = vec![OsString::from_vec(b"bad\xffname".to_vec())];

        let lines = render_entries(temp_dir.path(), &names, |_| {
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"))
        });

        assert_eq!(lines, vec!["[ERROR] bad\u{fffd}name: gone".to_string()]);
    }

    #[test]
    fn test_owner_falls_back_to_numeric_id() {
        let details = EntryDetails {
            mode: 0o100_644,
            nlink: 1,
            uid: 4_000_000_001,
            gid: 4_000_000_002,
            size: 42,
            modified: Local::now(),
        };

        let line = details.render("ghost");
        assert!(line.contains(" 4000000001 4000000002 "));
        assert!(line.ends_with(" ghost"));
    }

    #[test]
    fn test_root_resolves() {
        assert_eq!(user_name(0).as_deref(), Some("root"));
    }
}
