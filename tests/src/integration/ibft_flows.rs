//! # IBFT Sealing Flows
//!
//! Drives headers through qc-08-ibft-signer using keys and signatures from
//! qc-10-signature-verification, the way a validator network would:
//!
//! 1. **Proposer**: builds the header, writes the IBFT extra and the proposer seal
//! 2. **Validators**: each verifies the proposer and returns a committed seal
//! 3. **Proposer**: checks every seal, writes the quorum and hashes the header
//! 4. **Importer**: verifies committed seals and parent committed seals

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        build_chain, collect_committed_seals, create_ibft_header, ecdsa_keys,
        ecdsa_validator_set, init_tracing,
    };
    use qc_08_ibft_signer::{
        IbftError, IbftSigner, IbftSignerApi, KeyManager, SealState, ValidatorSet,
    };
    use qc_10_signature_verification::{recover_address, EcdsaSignature};
    use shared_types::{Header, KeccakHeaderHasher};
    use std::collections::HashMap;
    use std::sync::Arc;

    // =============================================================================
    // FULL ROUND
    // =============================================================================

    #[test]
    fn test_full_round_with_four_validators() {
        init_tracing();
        let keys = ecdsa_keys(4);
        let validators = ecdsa_validator_set(&keys);
        let signers: Vec<_> = keys.iter().map(|k| IbftSigner::new(Arc::clone(k))).collect();

        let proposer_index = validators
            .index_of(&validators.proposer(1, 0).unwrap())
            .unwrap();
        let proposer = &signers[proposer_index];

        let header = create_ibft_header(proposer, 1, &Header::default(), &validators);
        let header = proposer.write_seal(header).unwrap();

        // every validator checks the proposal before committing
        let mut seals = HashMap::new();
        for signer in &signers {
            assert_eq!(
                signer.recover_proposer(&header),
                Ok(keys[proposer_index].address())
            );
            seals.insert(signer.address(), signer.create_committed_seal(&header).unwrap());
        }

        for (address, seal) in &seals {
            proposer
                .verify_committed_seal(&header, &validators, address, seal)
                .unwrap();
        }

        let header = proposer
            .write_committed_seals(header, seals)
            .unwrap()
            .compute_hash(&proposer.header_hasher())
            .unwrap();

        // an importer that holds a different key reaches the same verdict
        let importer = &signers[(proposer_index + 1) % 4];
        assert_eq!(importer.verify_committed_seals(&header, &validators), Ok(4));
        assert_eq!(
            importer.seal_state(&header),
            Ok(SealState::CommitQuorumReached)
        );
    }

    #[test]
    fn test_committed_seals_are_plain_recoverable_signatures() {
        let keys = ecdsa_keys(4);
        let signer = IbftSigner::new(Arc::clone(&keys[0]));
        let chain = build_chain(&signer, &keys, 1);

        let extra = signer.get_ibft_extra(&chain[0]).unwrap();
        assert_eq!(extra.committed_seal.len(), 4);

        // each seal recovers to a validator with the qc-10 primitives alone
        let digest = qc_08_ibft_signer::domain::commit_digest(&chain[0], signer.scheme()).unwrap();
        let validators = ecdsa_validator_set(&keys);
        for seal in extra.committed_seal.iter() {
            let signature = EcdsaSignature::from_slice(seal).unwrap();
            let signer_address = recover_address(&digest, &signature).unwrap();
            assert!(validators.contains(&signer_address));
        }
    }

    // =============================================================================
    // CHAIN
    // =============================================================================

    #[test]
    fn test_chain_links_parent_committed_seals() {
        init_tracing();
        let keys = ecdsa_keys(4);
        let validators = ecdsa_validator_set(&keys);
        let signer = IbftSigner::new(Arc::clone(&keys[0]));
        let chain = build_chain(&signer, &keys, 5);

        assert!(signer
            .get_ibft_extra(&chain[0])
            .unwrap()
            .parent_committed_seal
            .is_empty());

        for pair in chain.windows(2) {
            let (parent, child) = (&pair[0], &pair[1]);
            assert_eq!(child.parent_hash, parent.hash);
            assert_eq!(
                signer.get_ibft_extra(parent).unwrap().committed_seal,
                signer.get_ibft_extra(child).unwrap().parent_committed_seal
            );
            assert_eq!(
                signer.verify_parent_committed_seals(parent, child, &validators),
                Ok(4)
            );
        }
    }

    #[test]
    fn test_identity_hash_differs_from_full_hash() {
        let keys = ecdsa_keys(4);
        let signer = IbftSigner::new(Arc::clone(&keys[0]));
        let chain = build_chain(&signer, &keys, 2);

        for header in &chain {
            let full = header.clone().compute_hash(&KeccakHeaderHasher).unwrap();
            assert_ne!(full.hash, header.hash);
            assert_eq!(signer.hash(header), full.hash);
            assert_eq!(signer.calculate_header_hash(header), Ok(header.hash));
        }
    }

    #[test]
    fn test_proposer_rotation_across_chain() {
        let keys = ecdsa_keys(4);
        let validators = ecdsa_validator_set(&keys);
        let signers: Vec<_> = keys.iter().map(|k| IbftSigner::new(Arc::clone(k))).collect();

        let mut parent = Header::default();
        let mut last_proposer = None;

        for number in 1..=8u64 {
            let expected = validators
                .calc_proposer(0, last_proposer.as_ref())
                .unwrap();
            let index = validators.index_of(&expected).unwrap();

            let header = create_ibft_header(&signers[index], number, &parent, &validators);
            let header = signers[index].write_seal(header).unwrap();
            let seals = collect_committed_seals(&header, &keys);
            let header = signers[index]
                .write_committed_seals(header, seals)
                .unwrap()
                .compute_hash(&signers[index].header_hasher())
                .unwrap();

            let recovered = signers[0].recover_proposer(&header).unwrap();
            assert_eq!(recovered, expected);

            last_proposer = Some(recovered);
            parent = header;
        }
    }

    // =============================================================================
    // VALIDATOR SET CHANGE
    // =============================================================================

    #[test]
    fn test_validator_set_change_verifies_against_parent_set() {
        let keys = ecdsa_keys(5);
        let old_set = ecdsa_validator_set(&keys[..4]);
        let new_set = ecdsa_validator_set(&keys);
        let signer = IbftSigner::new(Arc::clone(&keys[0]));

        let header1 = create_ibft_header(&signer, 1, &Header::default(), &old_set);
        let header1 = signer.write_seal(header1).unwrap();
        let seals = collect_committed_seals(&header1, &keys[..4]);
        let header1 = signer
            .write_committed_seals(header1, seals)
            .unwrap()
            .compute_hash(&signer.header_hasher())
            .unwrap();

        let header2 = create_ibft_header(&signer, 2, &header1, &new_set);
        assert_eq!(signer.get_ibft_extra(&header2).unwrap().validators, new_set);
        assert_eq!(
            signer.verify_parent_committed_seals(&header1, &header2, &old_set),
            Ok(4)
        );

        // the added validator cannot commit for a block of the old set
        let lone = collect_committed_seals(&header1, &keys[4..]);
        let lone_seal = lone.values().next().unwrap();
        assert!(matches!(
            signer.verify_committed_seal(&header1, &old_set, &keys[4].address(), lone_seal),
            Err(IbftError::UnknownSigner(_))
        ));
    }

    #[test]
    fn test_rejects_header_with_foreign_scheme_set() {
        let keys = ecdsa_keys(4);
        let signer = IbftSigner::new(Arc::clone(&keys[0]));
        let chain = build_chain(&signer, &keys, 1);

        let bls_set = ValidatorSet::empty(qc_08_ibft_signer::SchemeTag::Bls);
        assert!(matches!(
            signer.verify_committed_seals(&chain[0], &bls_set),
            Err(IbftError::SchemeMismatch { .. })
        ));
    }
}
