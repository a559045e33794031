//! Helpers shared by the integration tests.
#![allow(dead_code)]

use dnsrender::base::question::Question;
use dnsrender::base::{Class, Name, Rrset, Rtype};
use dnsrender::rdata::{Ns, A};
use dnsrender::tsig::{Algorithm, Key};

/// Installs a subscriber so trace output shows up in failing tests.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

pub fn name(s: &str) -> Name {
    s.parse().unwrap()
}

pub fn question(qname: &str, qtype: Rtype) -> Question {
    Question::new_in(name(qname), qtype)
}

/// Returns an A record set with one address for each of the last octets.
pub fn a_rrset(owner: &str, ttl: u32, hosts: &[u8]) -> Rrset {
    let mut rrset = Rrset::new(name(owner), Class::IN, Rtype::A);
    for host in hosts {
        rrset.add(A::from_octets(192, 0, 2, *host), Some(ttl)).unwrap();
    }
    rrset
}

/// Returns an NS record set with the given name servers.
pub fn ns_rrset(owner: &str, servers: &[&str]) -> Rrset {
    let mut rrset = Rrset::new(name(owner), Class::IN, Rtype::NS);
    for server in servers {
        rrset.add(Ns::new(name(server)), Some(86400)).unwrap();
    }
    rrset
}

pub fn key(owner: &str, algorithm: Algorithm) -> Key {
    Key::new(name(owner), algorithm, b"a very secret secret").unwrap()
}
