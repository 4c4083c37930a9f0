extern crate assert_cmd;
extern crate image;
extern crate num_cpus;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use image::{AnimationDecoder, GenericImageView};
use predicates::prelude::*;
use std::fs::File;
use std::process::Command;
use tempfile::tempdir;

fn mandel() -> Command {
    Command::cargo_bin("mandel").unwrap()
}

#[test]
fn still_writes_a_square_png() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("still.png");
    mandel()
        .args(&["still", "-t", "1", "-d", "24", "-i", "40", "-o"])
        .arg(&path)
        .assert()
        .success();
    let image = image::open(&path).unwrap();
    assert_eq!(image.dimensions(), (24, 24));
}

#[test]
fn still_accepts_a_custom_region() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("zoom.png");
    mandel()
        .args(&[
            "still", "-d", "12", "-l", "-0.75,-0.1", "-r", "-0.65,0.0", "-o",
        ])
        .arg(&path)
        .assert()
        .success();
    assert!(path.is_file());
}

#[test]
fn animate_writes_every_frame() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reveal.gif");
    mandel()
        .args(&["animate", "-d", "10", "-f", "6", "-t", "1", "-o"])
        .arg(&path)
        .assert()
        .success();
    let decoder = image::gif::Decoder::new(File::open(&path).unwrap()).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 6);
}

#[test]
fn threaded_animation_matches_single_threaded_animation() {
    // The CLI caps threads at the host's core count.
    let threads = num_cpus::get();
    if threads < 2 {
        return;
    }
    let threads = threads.min(4).to_string();
    let dir = tempdir().unwrap();
    let single = dir.path().join("single.gif");
    let threaded = dir.path().join("threaded.gif");
    mandel()
        .args(&["animate", "-d", "10", "-f", "5", "-t", "1", "-o"])
        .arg(&single)
        .assert()
        .success();
    mandel()
        .args(&["animate", "-d", "10", "-f", "5", "-t", threads.as_str(), "-o"])
        .arg(&threaded)
        .assert()
        .success();
    assert_eq!(
        std::fs::read(&single).unwrap(),
        std::fs::read(&threaded).unwrap()
    );
}

#[test]
fn zero_density_is_rejected() {
    mandel()
        .args(&["still", "-d", "0", "-o", "never.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Density must be between").from_utf8());
}

#[test]
fn zero_iterations_are_rejected() {
    mandel()
        .args(&["still", "-i", "0", "-o", "never.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Iteration count must be between").from_utf8());
}

#[test]
fn inverted_region_is_a_render_failure() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("never.png");
    mandel()
        .args(&["still", "-d", "4", "-l", "1,1", "-r", "-1,-1", "-o"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure: Invalid region").from_utf8());
    assert!(!path.exists());
}

#[test]
fn a_command_is_required() {
    mandel().assert().failure();
}

#[test]
fn threads_beyond_the_core_count_are_rejected() {
    let too_many = (num_cpus::get() + 1).to_string();
    mandel()
        .args(&[
            "animate",
            "-d",
            "4",
            "-f",
            "1",
            "-t",
            too_many.as_str(),
            "-o",
            "never.gif",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Thread count must be between").from_utf8());
}
