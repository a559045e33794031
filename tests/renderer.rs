mod common;

use common::{a_rrset, init_logging, key, name, ns_rrset, question};
use dnsrender::base::opt::{EdnsOption, OptRecord};
use dnsrender::base::{
    Class, ComposeOptions, Header, Message, Rdataset, RenderError, Renderer,
    Rtype, Section, TsigRcode,
};
use dnsrender::tsig::{Algorithm, DEFAULT_FUDGE};
use bytes::Bytes;
use rstest::rstest;

#[test]
fn sections_and_counts() {
    init_logging();
    let mut renderer = Renderer::new(Some(0x1234), 0x8500, 512, None);
    renderer
        .add_question(&question("example.com.", Rtype::A))
        .unwrap();
    let answer = a_rrset("www.example.com.", 300, &[1, 2]);
    renderer.add_rrset(Section::Answer, &answer).unwrap();
    let authority =
        ns_rrset("example.com.", &["ns1.example.com.", "ns2.example.com."]);
    renderer.add_rrset(Section::Authority, &authority).unwrap();
    renderer.write_header();
    assert_eq!(renderer.counts(), [1, 2, 2, 0]);
    assert_eq!(renderer.len(), 101);

    let wire = renderer.get_wire();
    // The owner of the first answer points to the question name.
    assert_eq!(&wire[29..35], b"\x03www\xc0\x0c");

    let msg = Message::from_octets(wire).unwrap();
    assert_eq!(msg.header().id(), 0x1234);
    assert!(msg.header().qr());
    assert!(msg.header().aa());
    assert!(msg.header().rd());
    assert_eq!(msg.header_section().counts(), [1, 2, 2, 0]);
    assert_eq!(msg.answer()[1].owner(), &name("www.example.com."));
    assert_eq!(msg.answer()[1].data().to_string(), "192.0.2.2");
    assert_eq!(msg.authority()[1].data().to_string(), "ns2.example.com.");
}

#[test]
fn going_back_fails_without_change() {
    let mut renderer = Renderer::new(Some(1), 0, 512, None);
    renderer
        .add_rrset(Section::Authority, &a_rrset("example.com.", 60, &[1]))
        .unwrap();
    let before = renderer.get_wire();
    let answer = a_rrset("example.com.", 60, &[2]);
    assert_eq!(
        renderer.add_rrset(Section::Answer, &answer),
        Err(RenderError::FormError)
    );
    assert_eq!(
        renderer.add_question(&question("example.com.", Rtype::A)),
        Err(RenderError::FormError)
    );
    assert_eq!(renderer.get_wire(), before);
    assert_eq!(renderer.counts(), [0, 0, 1, 0]);
}

#[test]
fn too_big_rolls_back_compression() {
    init_logging();
    let mut renderer = Renderer::new(Some(1), 0, 60, None);
    renderer
        .add_question(&question("example.com.", Rtype::A))
        .unwrap();
    assert_eq!(renderer.len(), 29);
    assert_eq!(renderer.compression().len(), 2);

    let answer = a_rrset("www.example.com.", 60, &[1, 2]);
    assert_eq!(
        renderer.add_rrset(Section::Answer, &answer),
        Err(RenderError::TooBig)
    );
    assert_eq!(renderer.len(), 29);
    assert_eq!(renderer.compression().len(), 2);
    assert_eq!(renderer.count(Section::Answer), 0);

    // The renderer is still usable afterwards.
    renderer
        .add_rrset(Section::Answer, &a_rrset("example.com.", 60, &[1]))
        .unwrap();
    assert_eq!(renderer.len(), 45);
    assert_eq!(renderer.count(Section::Answer), 1);

    renderer.set_flags(renderer.flags() | Header::TC);
    renderer.write_header();
    let msg = Message::from_octets(renderer.into_wire()).unwrap();
    assert!(msg.header().tc());
    assert_eq!(msg.answer().len(), 1);
}

#[test]
fn reserve_room_for_tsig() {
    let key = key("key.", Algorithm::Sha256);
    assert_eq!(key.compose_reserve_len(), 76);

    let mut renderer = Renderer::new(Some(1), 0, 128, None);
    renderer.reserve(key.compose_reserve_len()).unwrap();
    assert_eq!(renderer.max_size(), 52);
    renderer
        .add_question(&question("example.com.", Rtype::A))
        .unwrap();
    renderer
        .add_rrset(Section::Answer, &a_rrset("example.com.", 60, &[1]))
        .unwrap();
    assert_eq!(
        renderer.add_rrset(
            Section::Additional,
            &a_rrset("example.com.", 60, &[2, 3])
        ),
        Err(RenderError::TooBig)
    );
    renderer.release_reserved();
    assert_eq!(renderer.max_size(), 128);
    renderer.write_header();
    renderer
        .add_tsig(
            key.name(),
            &key,
            DEFAULT_FUDGE,
            1,
            TsigRcode::NOERROR,
            Bytes::new(),
            None,
            &key.algorithm().to_name(),
        )
        .unwrap();
    assert_eq!(renderer.len(), 45 + 76);
    assert_eq!(renderer.count(Section::Additional), 1);
}

#[test]
fn bad_reservation() {
    let mut renderer = Renderer::new(Some(1), 0, 100, None);
    assert_eq!(renderer.reserve(101), Err(RenderError::BadReservation));
    assert_eq!(renderer.reserved(), 0);
    assert_eq!(renderer.max_size(), 100);
}

#[rstest]
#[case(128)]
#[case(468)]
#[case(7)]
fn padding(#[case] pad: usize) {
    let mut renderer = Renderer::new(Some(1), 0, 1232, None);
    renderer.add_question(&question("a.", Rtype::A)).unwrap();
    let opt = OptRecord::for_version(0, 0, 1232, vec![]);
    renderer
        .add_opt(&opt, pad, opt.padded_compose_len(), 0)
        .unwrap();
    renderer.write_header();
    assert!(renderer.was_padded());
    assert_eq!(renderer.len() % pad, 0);

    let msg = Message::from_octets(renderer.into_wire()).unwrap();
    let opt = msg.opt().unwrap();
    assert_eq!(opt.udp_payload_size(), 1232);
    match opt.opt().iter().next() {
        Some(EdnsOption::Padding(padding)) => {
            assert_eq!(usize::from(padding.len()), pad - 34 % pad)
        }
        other => panic!("unexpected option {:?}", other),
    }
}

#[test]
fn empty_padding_option() {
    // 19 octets of header and question plus 15 octets of OPT record with
    // an empty padding option.
    let mut renderer = Renderer::new(Some(1), 0, 512, None);
    renderer.add_question(&question("a.", Rtype::A)).unwrap();
    let opt = OptRecord::for_version(0, 0, 1232, vec![]);
    renderer.add_opt(&opt, 34, 15, 0).unwrap();
    assert_eq!(renderer.len(), 34);
    assert_eq!(&renderer.as_slice()[30..], b"\x00\x0c\x00\x00");
}

#[test]
fn padding_accounts_for_tsig() {
    // A key named like the question to show the name isn't compressed.
    let key = key("a.", Algorithm::Sha256);
    assert_eq!(key.compose_reserve_len(), 74);

    let mut renderer = Renderer::new(Some(1), 0, 512, None);
    renderer.add_question(&question("a.", Rtype::A)).unwrap();
    let opt = OptRecord::for_version(0, 0, 1232, vec![]);
    let opt_size = opt.padded_compose_len();
    renderer
        .add_opt(&opt, 128, opt_size, key.compose_reserve_len())
        .unwrap();
    assert_eq!(renderer.len(), 54);
    renderer.write_header();
    renderer
        .add_tsig(
            key.name(),
            &key,
            DEFAULT_FUDGE,
            1,
            TsigRcode::NOERROR,
            Bytes::new(),
            None,
            &key.algorithm().to_name(),
        )
        .unwrap();
    assert_eq!(renderer.len(), 128);
    assert_eq!(&renderer.as_slice()[54..57], b"\x01a\x00");
    assert_eq!(renderer.count(Section::Additional), 2);
}

#[test]
fn bad_opt_size() {
    let mut renderer = Renderer::new(Some(1), 0, 512, None);
    let opt = OptRecord::for_version(0, 0, 1232, vec![]);
    assert_eq!(
        renderer.add_opt(&opt, 128, 10, 0),
        Err(RenderError::BadOptSize)
    );
    assert!(!renderer.was_padded());
    assert!(renderer.is_empty());
}

#[test]
fn edns_version() {
    let mut renderer = Renderer::new(Some(1), 0, 512, None);
    renderer.add_edns(1, 0x00FF_8000, 4096, vec![]).unwrap();
    renderer.write_header();
    let msg = Message::from_octets(renderer.into_wire()).unwrap();
    let opt = msg.opt().unwrap();
    assert_eq!(opt.version(), 1);
    assert_eq!(opt.flags(), 0x0001_8000);
    assert!(opt.dnssec_ok());
    assert_eq!(opt.udp_payload_size(), 4096);
    assert!(opt.opt().is_empty());
}

#[test]
fn relative_names_and_origin() {
    let mut renderer =
        Renderer::new(Some(1), 0, 512, Some(name("example.com.")));
    renderer
        .add_rrset(Section::Answer, &a_rrset("www", 60, &[1]))
        .unwrap();
    renderer.write_header();
    let msg = Message::from_octets(renderer.into_wire()).unwrap();
    assert_eq!(msg.answer()[0].owner(), &name("www.example.com."));
}

#[test]
fn class_override() {
    let mut renderer = Renderer::new(Some(1), 0, 512, None);
    renderer
        .add_rrset_with(
            Section::Answer,
            &a_rrset("example.com.", 60, &[1]),
            &ComposeOptions::default().with_class(Class::CH),
        )
        .unwrap();
    renderer.write_header();
    let msg = Message::from_octets(renderer.into_wire()).unwrap();
    assert_eq!(msg.answer()[0].class(), Class::CH);
}

#[test]
fn rdataset_with_explicit_owner() {
    let mut renderer = Renderer::new(Some(1), 0, 512, None);
    renderer
        .add_question(&question("example.com.", Rtype::A))
        .unwrap();
    // The owner of the record set is not used.
    let addrs = a_rrset("elsewhere.", 60, &[1, 2]);
    renderer
        .add_rdataset(
            Section::Answer,
            &name("www.example.com."),
            addrs.rdataset(),
        )
        .unwrap();
    assert_eq!(renderer.count(Section::Answer), 2);
    assert_eq!(renderer.len(), 65);

    // An empty set moves on to its section but writes nothing.
    let empty = Rdataset::new(Class::IN, Rtype::NS);
    renderer
        .add_rdataset(Section::Authority, &name("example.com."), &empty)
        .unwrap();
    assert_eq!(renderer.section(), Section::Authority);
    assert_eq!(renderer.counts(), [1, 2, 0, 0]);
    assert_eq!(renderer.len(), 65);

    renderer.write_header();
    let msg = Message::from_octets(renderer.into_wire()).unwrap();
    assert_eq!(msg.header_section().counts(), [1, 2, 0, 0]);
    assert_eq!(msg.answer()[0].owner(), &name("www.example.com."));
    assert_eq!(msg.answer()[1].owner(), &name("www.example.com."));
    assert!(msg.authority().is_empty());
}

#[test]
fn canonical_answer_is_not_compressed() {
    let mut renderer = Renderer::new(Some(1), 0, 512, None);
    renderer
        .add_question(&question("example.com.", Rtype::NS))
        .unwrap();
    renderer
        .add_rrset_with(
            Section::Answer,
            &ns_rrset("Example.COM.", &["NS1.example.com."]),
            &ComposeOptions::canonical(),
        )
        .unwrap();
    // 13 octets of owner, 10 of record header, 17 of name server name.
    assert_eq!(renderer.len(), 29 + 40);
    let answer = &renderer.as_slice()[29..];
    assert!(!answer.iter().any(|octet| octet & 0xC0 == 0xC0));
    assert_eq!(&answer[..13], b"\x07example\x03com\x00");
    assert_eq!(&answer[23..], b"\x03ns1\x07example\x03com\x00");
    assert_eq!(renderer.compression().len(), 2);
}
