use std::io::{self, Read};
use std::process::exit;

use joinery::prelude::*;
use lazy_format::lazy_format;

use square_cover::{accumulate, build_prefix_sums, scan_windows, Problem, GRID_EXTENT};

const RULE: &str = "==========================================";

trait ReadString: Read {
    fn read_string(&mut self) -> io::Result<String> {
        let mut data = String::new();
        self.read_to_string(&mut data).map(|_| data)
    }
}

impl<T: Read> ReadString for T {}

fn main() {
    let banner = [
        RULE,
        "  2D Prefix Sum - Max Window Problem",
        "  二维前缀和 - 最大窗口问题",
        RULE,
    ];
    println!("{}", banner.iter().join_with('\n'));
    println!();
    println!("Enter n m, then n lines of \"x y value\" / 输入 n m，然后 n 行 \"x y 价值\"");
    println!("(finish with end-of-file / 以文件结束符结尾)");
    println!("--------------------------------------------");

    let input = io::stdin().read_string().unwrap_or_else(|err| {
        eprintln!("Error reading input / 读取输入失败: {}", err);
        exit(1);
    });

    let problem: Problem = input.parse().unwrap_or_else(|err| {
        eprintln!("Invalid input / 输入无效: {}", err);
        exit(1);
    });

    println!();
    println!("Building 2D prefix sums... / 构建二维前缀和...");
    let mut grid = accumulate(&problem.targets, GRID_EXTENT);
    build_prefix_sums(&mut grid);

    let scanning = lazy_format!(
        "Scanning all possible {m}x{m} windows... / 扫描所有可能的 {m}x{m} 窗口...",
        m = problem.window
    );
    println!("{}", scanning);

    let answer = scan_windows(&grid, problem.window);

    println!();
    println!("{}", RULE);
    println!("  RESULT / 结果: Maximum value / 最大值 = {}", answer);
    println!("{}", RULE);
}
