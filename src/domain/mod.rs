// 도메인 계층: 호스트와 주고받는 모델, 액션이 의존하는 포트

pub mod model;
pub mod ports;
