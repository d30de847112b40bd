use super::ContentHash;
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const CHUNK_SIZE: usize = 64 * 1024; // 64KB

/// Stream a file through SHA-1 in fixed-size chunks.
///
/// The chunk size only bounds memory use; the digest is the same as hashing
/// the whole byte sequence at once.
pub fn hash_file(file: &Path) -> io::Result<ContentHash> {
    let mut f = File::open(file)?;
    hash_reader(&mut f)
}

pub fn hash_reader<R: Read>(reader: &mut R) -> io::Result<ContentHash> {
    let mut hasher = Sha1::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(ContentHash::from_digest(&hasher.finalize()))
}

pub fn hash_data(data: &[u8]) -> ContentHash {
    ContentHash::from_digest(&Sha1::digest(data))
}
