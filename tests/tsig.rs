mod common;

use common::{a_rrset, init_logging, key, question};
use dnsrender::base::{Message, Renderer, Rtype, Section, TsigRcode};
use dnsrender::rdata::Time48;
use dnsrender::tsig::keyring::Keyring;
use dnsrender::tsig::{
    Algorithm, Key, SigningContext, ValidationError, DEFAULT_FUDGE,
};
use bytes::Bytes;
use rstest::rstest;

/// Renders a signed query for `example.com.`
fn signed_query(key: &Key, id: u16, time: Time48) -> Renderer {
    let mut renderer = Renderer::new(Some(id), 0x0100, 512, None);
    renderer.set_signing_time(Some(time));
    renderer
        .add_question(&question("example.com.", Rtype::A))
        .unwrap();
    renderer.write_header();
    renderer
        .add_tsig(
            key.name(),
            key,
            DEFAULT_FUDGE,
            id,
            TsigRcode::NOERROR,
            Bytes::new(),
            None,
            &key.algorithm().to_name(),
        )
        .unwrap();
    renderer
}

/// Renders one message of a signed zone transfer.
fn transfer_message(
    key: &Key,
    time: Time48,
    host: u8,
    ctx: Option<SigningContext>,
) -> (Bytes, SigningContext) {
    let mut renderer = Renderer::new(Some(7), 0x8400, 512, None);
    renderer.set_signing_time(Some(time));
    renderer
        .add_rrset(Section::Answer, &a_rrset("example.com.", 3600, &[host]))
        .unwrap();
    renderer.write_header();
    let ctx = renderer
        .add_multi_tsig(
            ctx,
            key.name(),
            key,
            DEFAULT_FUDGE,
            7,
            TsigRcode::NOERROR,
            Bytes::new(),
            None,
        )
        .unwrap();
    (renderer.into_wire(), ctx)
}

#[rstest]
#[case(Algorithm::Sha1)]
#[case(Algorithm::Sha256)]
#[case(Algorithm::Sha256_128)]
#[case(Algorithm::Sha384)]
#[case(Algorithm::Sha384_192)]
#[case(Algorithm::Sha512)]
#[case(Algorithm::Sha512_256)]
fn sign_and_validate(#[case] algorithm: Algorithm) {
    init_logging();
    let key = key("key.example.", algorithm);
    let now = Time48::from_u64(1_700_000_000);
    let renderer = signed_query(&key, 0x4242, now);
    assert_eq!(renderer.mac().len(), algorithm.mac_len());

    let wire = renderer.get_wire();
    let msg = Message::from_octets(wire.clone()).unwrap();
    assert_eq!(msg.header_section().arcount(), 1);
    let (owner, tsig, _) = msg.tsig().unwrap();
    assert_eq!(owner, key.name());
    assert_eq!(tsig.algorithm(), &algorithm.to_name());
    assert_eq!(tsig.time_signed(), now);
    assert_eq!(tsig.mac(), renderer.mac());

    assert!(matches!(
        key.validate_message(&wire, now, None, None, false),
        Ok(None)
    ));
}

#[test]
fn changed_id_still_validates() {
    let key = key("key.", Algorithm::Sha256);
    let now = Time48::now();
    let mut wire = signed_query(&key, 0x4242, now).get_wire().to_vec();
    wire[0] = 0x99;
    assert!(matches!(
        key.validate_message(&wire, now, None, None, false),
        Ok(None)
    ));
}

#[test]
fn validation_failures() {
    let key = key("key.", Algorithm::Sha256);
    let now = Time48::from_u64(1_700_000_000);
    let wire = signed_query(&key, 1, now).into_wire();

    let other_secret =
        Key::new(key.name().clone(), Algorithm::Sha256, b"wrong").unwrap();
    assert_eq!(
        other_secret
            .validate_message(&wire, now, None, None, false)
            .unwrap_err(),
        ValidationError::BadSig
    );

    let other_name = common::key("other.", Algorithm::Sha256);
    assert_eq!(
        other_name
            .validate_message(&wire, now, None, None, false)
            .unwrap_err(),
        ValidationError::BadKey
    );

    let other_algorithm = common::key("key.", Algorithm::Sha512);
    assert_eq!(
        other_algorithm
            .validate_message(&wire, now, None, None, false)
            .unwrap_err(),
        ValidationError::BadAlgorithm
    );

    let late =
        Time48::from_u64(1_700_000_000 + u64::from(DEFAULT_FUDGE) + 1);
    assert_eq!(
        key
            .validate_message(&wire, late, None, None, false)
            .unwrap_err(),
        ValidationError::BadTime
    );

    let mut altered = wire.to_vec();
    // Change the query type in the question.
    altered[26] = 0x1c;
    assert_eq!(
        key
            .validate_message(&altered, now, None, None, false)
            .unwrap_err(),
        ValidationError::BadSig
    );

    let unsigned = Renderer::new(Some(1), 0, 512, None).into_wire();
    assert_eq!(
        key
            .validate_message(&unsigned, now, None, None, false)
            .unwrap_err(),
        ValidationError::FormErr
    );
}

#[test]
fn response_includes_request_mac() {
    let key = key("key.", Algorithm::Sha256);
    let now = Time48::now();
    let request = signed_query(&key, 5, now);
    let request_mac = request.mac().clone();

    let mut response = Renderer::new(Some(5), 0x8500, 512, None);
    response.set_signing_time(Some(now));
    response
        .add_question(&question("example.com.", Rtype::A))
        .unwrap();
    response
        .add_rrset(Section::Answer, &a_rrset("example.com.", 60, &[1]))
        .unwrap();
    response.write_header();
    response
        .add_tsig(
            key.name(),
            &key,
            DEFAULT_FUDGE,
            5,
            TsigRcode::NOERROR,
            Bytes::new(),
            Some(&request_mac),
            &key.algorithm().to_name(),
        )
        .unwrap();
    let wire = response.into_wire();

    assert!(matches!(
        key.validate_message(&wire, now, Some(&request_mac), None, false),
        Ok(None)
    ));
    assert_eq!(
        key
            .validate_message(&wire, now, None, None, false)
            .unwrap_err(),
        ValidationError::BadSig
    );
}

#[test]
fn multi_message_chain() {
    init_logging();
    let key = key("xfr.", Algorithm::Sha256);
    let now = Time48::from_u64(1_700_000_000);
    let (first, ctx) = transfer_message(&key, now, 1, None);
    let (second, _) = transfer_message(&key, now, 2, Some(ctx));

    let ctx = key
        .validate_message(&first, now, None, None, true)
        .unwrap()
        .unwrap();
    assert!(key
        .validate_message(&second, now, None, Some(ctx), true)
        .unwrap()
        .is_some());

    // The second message only validates as the successor of the first.
    let (other_first, _) = transfer_message(&key, now, 9, None);
    let other_ctx = key
        .validate_message(&other_first, now, None, None, true)
        .unwrap();
    assert_eq!(
        key
            .validate_message(&second, now, None, other_ctx, true)
            .unwrap_err(),
        ValidationError::BadSig
    );

    // Altering the first message breaks its own signature.
    let mut altered = first.to_vec();
    altered[38] ^= 0xff;
    assert_eq!(
        key.validate_message(&altered, now, None, None, true).unwrap_err(),
        ValidationError::BadSig
    );
}

#[test]
fn keyring_round_trip() {
    let keyring: Keyring = [
        Key::generate("one.example.".parse().unwrap(), Algorithm::Sha256)
            .unwrap()
            .0,
        Key::generate("two.example.".parse().unwrap(), Algorithm::Sha1)
            .unwrap()
            .0,
        key("three.example.", Algorithm::Sha512_256),
    ]
    .into_iter()
    .collect();
    let text = keyring.to_text();
    assert_eq!(text.lines().count(), 3);
    assert_eq!(Keyring::from_text(&text).unwrap(), keyring);

    // A key from the keyring signs what the original key validates.
    let stored = keyring.get_key(None).unwrap();
    let now = Time48::now();
    let wire = signed_query(stored, 3, now).into_wire();
    let parsed = Keyring::from_text(&text).unwrap();
    assert!(matches!(
        parsed
            .get_key(Some(stored.name()))
            .unwrap()
            .validate_message(&wire, now, None, None, false),
        Ok(None)
    ));
}
