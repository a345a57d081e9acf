//! 实体 ID 生成
//!
//! 格式: 前缀 + 毫秒时间戳 + 3 位数字 + 3 个大写字母
//! 例如 `P-1718000000000042QZK`

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use rand::Rng;

/// 调用方传入 ID 的最小长度
pub const ID_MIN_LEN: usize = 20;

/// 调用方传入 ID 的最大长度
pub const ID_MAX_LEN: usize = 25;

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// 字母后缀的组合数 (26^3)
const LETTER_SPACE: u32 = 26 * 26 * 26;

/// 数字 + 字母后缀的组合数
const SUFFIX_SPACE: u32 = 1000 * LETTER_SPACE;

/// 与 SUFFIX_SPACE 互素的乘数 (不含因子 2, 5, 13)，使相邻序号映射到相距很远的后缀
const SCRAMBLE: u64 = 9_737_333;

/// 进程内后缀序列，起点与偏移量随机
struct Sequence {
    next: AtomicU32,
    offset: u64,
}

fn sequence() -> &'static Sequence {
    static SEQUENCE: OnceLock<Sequence> = OnceLock::new();
    SEQUENCE.get_or_init(|| {
        let mut rng = rand::thread_rng();
        Sequence {
            next: AtomicU32::new(rng.gen_range(0..SUFFIX_SPACE)),
            offset: u64::from(rng.gen_range(0..SUFFIX_SPACE)),
        }
    })
}

/// 序号到后缀的置换: `(n * SCRAMBLE + offset) mod SUFFIX_SPACE`
fn scramble(n: u32, offset: u64) -> u32 {
    let space = u64::from(SUFFIX_SPACE);
    ((u64::from(n % SUFFIX_SPACE) * SCRAMBLE + offset) % space) as u32
}

/// 生成带前缀的实体 ID
///
/// 3 位数字和 3 个字母不是逐次独立抽样，而是随机起点序列经置换后的结果：
/// 看起来是随机的，但同一进程内在整个后缀空间耗尽前不会重复。
/// 跨进程的唯一性仍是概率性的，不做碰撞检测。
pub fn generate_id(prefix: &str) -> String {
    let timestamp = Utc::now().timestamp_millis();
    let seq = sequence();
    let suffix = scramble(seq.next.fetch_add(1, Ordering::Relaxed), seq.offset);

    let number = suffix / LETTER_SPACE;
    let mut rest = suffix % LETTER_SPACE;
    let mut letters = [0u8; 3];
    for slot in letters.iter_mut().rev() {
        *slot = LETTERS[(rest % 26) as usize];
        rest /= 26;
    }
    let letters: String = letters.iter().map(|&b| b as char).collect();

    format!("{prefix}{timestamp}{number:03}{letters}")
}

/// 检查 ID 长度是否在接受范围内
pub fn is_valid_id_length(id: &str) -> bool {
    (ID_MIN_LEN..=ID_MAX_LEN).contains(&id.len())
}
