// Copyright 2025 Andrew Conway.
// This file is part of MassElectionStats.
// MassElectionStats is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// MassElectionStats is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with MassElectionStats.  If not, see <https://www.gnu.org/licenses/>.

use std::path::{PathBuf, Path};
use std::fs::File;
use std::io::Read;
use std::thread::sleep;
use std::time::Duration;
use std::sync::Mutex;
use once_cell::sync::OnceCell;

/// Helper for downloading a URL to a local file equivalent.
/// Tries to make this an obvious mirror of the URL.
/// This is not possible for URLs ending in / (or the root dir); these have index.html added on.
pub struct CacheDir {
    base : PathBuf,
}

impl CacheDir {
    fn rate_limit() {
        static DOWNLOAD_RATE_LIMIT_MUTEX: OnceCell<Mutex<()>> = OnceCell::new();
        let _lock = DOWNLOAD_RATE_LIMIT_MUTEX.get_or_init(||Mutex::new(())).lock().unwrap();
        sleep(Duration::from_millis(1000));
    }
    pub fn new<P:AsRef<Path>>(path:P) -> Self {
        let path : &Path = path.as_ref();
        CacheDir{ base: path.to_path_buf() }
    }

    /// Get where a file representing said path should be stored.
    pub fn file(&self,url_path:&str) -> PathBuf {
        let res = self.base.join(url_path);
        if url_path.chars().last().map(std::path::is_separator).unwrap_or(true) { res.join("index.html")} else {res}
    }

    /// Get the path a file for a url should be stored to.
    pub fn file_for_url(&self,url:&str) -> PathBuf {
        let url_path = url.trim_start_matches("https://").trim_start_matches("http://").to_string();
        self.file(&url_path)
    }

    /// Download a url using Reqwest, and store.
    pub fn get_or_download(&self,url:&str) -> anyhow::Result<File> {
        self.get_or_download_impl(url,false)
    }

    fn get_or_download_impl(&self,url:&str,json_headers:bool) -> anyhow::Result<File> {
        let file = self.file_for_url(url);
        match File::open(&file) {
            Ok(f) => Ok(f),
            Err(_) => {
                // need to download it,
                println!("Downloading {} with reqwest",url);
                Self::rate_limit();
                let client = reqwest::blocking::Client::new();
                let mut request = client.get(url);
                if json_headers {
                    request = request
                        .header(reqwest::header::ACCEPT,"application/json")
                        .header(reqwest::header::CONTENT_TYPE,"application/json");
                }
                let contents = request.send()?.bytes()?;
                if let Some(p) = file.parent() {
                    std::fs::create_dir_all(p)?;
                }
                std::fs::write(&file,contents)?;
                Ok(File::open(&file)?)
            }
        }
    }

    /// Download a url using Reqwest, and return as a string.
    pub fn get_or_download_string(&self,url:&str) -> anyhow::Result<String> {
        let mut file = self.get_or_download(url)?;
        file_to_string(&mut file)
    }

    /// Download a url using Reqwest and parse as JSON. The search API will not answer
    /// with JSON unless the request asks for it explicitly in its headers.
    pub fn get_or_download_json(&self,url:&str) -> anyhow::Result<serde_json::Value> {
        let mut file = self.get_or_download_impl(url,true)?;
        let text = file_to_string(&mut file)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Read a file to a string. Like file.read_to_string but doesn't need a provided buffer.
pub fn file_to_string(file:&mut File) -> anyhow::Result<String> {
    let mut res = String::new();
    file.read_to_string(&mut res)?;
    Ok(res)
}
