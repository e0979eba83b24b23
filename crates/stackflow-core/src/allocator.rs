//! 命名・アドレス割り当て
//!
//! 名前プールの先頭から `count` 個を取り、i番目に
//! `subnet + base_offset + i` のアドレスを割り当てる。

use crate::error::{Result, StackError};
use crate::model::{AddressPlan, ControllerIdentity};
use std::net::Ipv4Addr;
use tracing::debug;

/// コントローラーIDを割り当てる
///
/// `count` が名前プールより大きい場合、またはアドレスがサブネットの
/// ホスト範囲を超える場合は設定エラー。部分的な結果は返さない。
pub fn allocate(
    count: usize,
    name_pool: &[String],
    plan: &AddressPlan,
) -> Result<Vec<ControllerIdentity>> {
    if count > name_pool.len() {
        return Err(StackError::NamePoolExhausted {
            requested: count,
            available: name_pool.len(),
        });
    }

    let identities = name_pool
        .iter()
        .take(count)
        .enumerate()
        .map(|(index, name)| {
            let offset = plan.base_offset.saturating_add(index as u32);
            let private_address =
                plan.subnet
                    .host(offset)
                    .ok_or_else(|| StackError::AddressOutOfRange {
                        address: Ipv4Addr::from(
                            u32::from(plan.subnet.network()).saturating_add(offset),
                        ),
                        subnet: plan.subnet.to_string(),
                    })?;
            Ok(ControllerIdentity {
                name: name.clone(),
                index,
                private_address,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(count = identities.len(), "Controllers allocated");
    Ok(identities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn pool(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("node{:03}", i)).collect()
    }

    fn phonetic() -> Vec<String> {
        ["alpha", "bravo", "charlie", "delta", "echo"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_allocate_three() {
        let ids = allocate(3, &phonetic(), &AddressPlan::default()).unwrap();
        let names: Vec<&str> = ids.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "bravo", "charlie"]);
        assert_eq!(ids[0].private_address, Ipv4Addr::new(10, 0, 0, 10));
        assert_eq!(ids[1].private_address, Ipv4Addr::new(10, 0, 0, 11));
        assert_eq!(ids[2].private_address, Ipv4Addr::new(10, 0, 0, 12));
        assert_eq!(ids[2].index, 2);
    }

    #[test]
    fn test_allocate_zero() {
        let ids = allocate(0, &phonetic(), &AddressPlan::default()).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn test_allocate_zero_from_empty_pool() {
        assert!(allocate(0, &[], &AddressPlan::default()).unwrap().is_empty());
    }

    #[test]
    fn test_allocate_exceeds_pool() {
        let err = allocate(6, &phonetic(), &AddressPlan::default()).unwrap_err();
        assert!(matches!(
            err,
            StackError::NamePoolExhausted {
                requested: 6,
                available: 5
            }
        ));
    }

    #[test]
    fn test_allocate_exceeds_subnet() {
        // /28 のホストは .1〜.14 なので offset 10 からは 5 台まで
        let plan = AddressPlan {
            subnet: "10.0.0.0/28".parse().unwrap(),
            ..AddressPlan::default()
        };
        assert_eq!(allocate(4, &pool(10), &plan).unwrap().len(), 4);
        assert!(allocate(5, &pool(10), &plan).is_ok());
        let err = allocate(6, &pool(10), &plan).unwrap_err();
        assert!(matches!(err, StackError::AddressOutOfRange { .. }));
    }

    #[test]
    fn test_allocate_custom_offset() {
        let plan = AddressPlan {
            base_offset: 100,
            ..AddressPlan::default()
        };
        let ids = allocate(2, &phonetic(), &plan).unwrap();
        assert_eq!(ids[0].private_address, Ipv4Addr::new(10, 0, 0, 100));
        assert_eq!(ids[1].private_address, Ipv4Addr::new(10, 0, 0, 101));
    }

    proptest! {
        #[test]
        fn prop_allocations_are_unique_and_offset(count in 0usize..=200) {
            let names = pool(200);
            let ids = allocate(count, &names, &AddressPlan::default()).unwrap();

            prop_assert_eq!(ids.len(), count);
            let distinct_names: HashSet<_> = ids.iter().map(|c| &c.name).collect();
            let distinct_addrs: HashSet<_> = ids.iter().map(|c| c.private_address).collect();
            prop_assert_eq!(distinct_names.len(), count);
            prop_assert_eq!(distinct_addrs.len(), count);

            for (i, id) in ids.iter().enumerate() {
                prop_assert_eq!(id.index, i);
                prop_assert_eq!(id.private_address, Ipv4Addr::new(10, 0, 0, (10 + i) as u8));
            }
        }

        #[test]
        fn prop_allocate_is_pure(count in 0usize..=5) {
            let plan = AddressPlan::default();
            prop_assert_eq!(
                allocate(count, &phonetic(), &plan).unwrap(),
                allocate(count, &phonetic(), &plan).unwrap()
            );
        }
    }
}
