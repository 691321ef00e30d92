// 어댑터 계층: 외부 연동 구현 (시스템 시계, 호스트 웹훅)

pub mod clock;
pub mod webhook;
